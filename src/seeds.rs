//! Built-in question banks, so the engine is usable without any bank file.

use crate::domain::{Bank, Choice, ChoiceKey, Question};

fn q(id: u32, text: &str, choices: &[&str], answer: ChoiceKey, explanation: Option<&str>) -> Question {
  Question {
    id,
    text: text.into(),
    image: None,
    choices: ChoiceKey::ALL
      .iter()
      .zip(choices)
      .map(|(key, text)| Choice { key: *key, text: (*text).into() })
      .collect(),
    answer,
    explanation: explanation.map(Into::into),
  }
}

/// Seed questions for `bank`, in bank order.
pub fn seed_questions(bank: Bank) -> Vec<Question> {
  use ChoiceKey::*;
  match bank {
    Bank::Pp => vec![
      q(1, "What must be worn when preparing a spray mixture?",
        &["Gloves only when it is windy", "The protective equipment listed on the label", "Nothing if the product is diluted"],
        B, Some("The label lists the personal protective equipment for each stage of use.")),
      q(2, "Where should empty product containers be rinsed?",
        &["Into the sprayer tank", "Into the nearest ditch"],
        A, Some("Rinse water goes back into the tank so it is applied on the treated crop.")),
      q(3, "Which pictogram signals a product that is dangerous for the environment?",
        &["A flame", "A dead tree and fish", "An exclamation mark"],
        B, None),
      q(4, "Who may apply products authorised for professional use?",
        &["Anyone over 18", "Holders of a valid phytolicence", "Only farm owners"],
        B, None),
      q(5, "Before spraying, the sprayer must be:",
        &["Checked for leaks and calibrated", "Filled to the brim", "Cleaned with bleach"],
        A, Some("A leaking or badly calibrated sprayer leads to overdosing and contamination.")),
    ],
    Bank::Np => vec![
      q(1, "A customer asks for a weedkiller for a paved terrace. What do you advise first?",
        &["The strongest product in stock", "Non-chemical alternatives such as brushing or hot water", "Doubling the dose"],
        B, Some("Non-chemical methods come first; paved surfaces drain straight into sewers.")),
      q(2, "Products for non-professional use must be stored:",
        &["Out of reach of children, in their original packaging", "In food containers for easy dosing"],
        A, None),
      q(3, "Where must a leftover product for amateur use be brought?",
        &["Household waste", "A container park collection point", "The sink"],
        B, None),
      q(4, "What does the authorisation number on the label prove?",
        &["That the product is organic", "That the product is authorised on the market", "That it has no risk"],
        B, None),
    ],
    Bank::P2 => vec![
      q(1, "What is the buffer zone next to surface water for?",
        &["Limiting drift and run-off into the water", "Storing equipment", "Parking the tractor"],
        A, Some("Buffer zones protect aquatic organisms from drift and run-off.")),
      q(2, "Integrated pest management means:",
        &["Spraying on a fixed calendar", "Combining prevention, observation and intervention only when justified"],
        B, None),
      q(3, "In parks and gardens, which treatment is preferred near a playground?",
        &["Mechanical or thermal weeding", "Broad-spectrum herbicides", "Fumigation"],
        A, None),
      q(4, "A spray register must record:",
        &["Only the price of the products", "Product, dose, date and treated plot", "The weather forecast for the week"],
        B, Some("Traceability requires product, dose, date and location of each treatment.")),
      q(5, "When is spraying forbidden?",
        &["When wind speed exceeds the limit set by the rules", "Every Monday", "When the temperature is below 25°C"],
        A, None),
    ],
    Bank::P3 => vec![
      q(1, "Before selling a professional product, the distributor must check:",
        &["That the buyer holds a valid phytolicence", "The buyer's age only", "Nothing, the label is enough"],
        A, None),
      q(2, "Advice given to a professional buyer must cover:",
        &["The risks, the correct use and the alternatives", "Only the price"],
        A, Some("Advice at sale covers risks, correct use and low-risk alternatives.")),
      q(3, "A product whose authorisation is withdrawn can be sold:",
        &["Indefinitely", "Only during the legal sell-off period", "Only to amateurs"],
        B, None),
      q(4, "A storage room for professional products must be:",
        &["Ventilated, locked and fitted with a spill retention system", "Next to the food shelves", "Heated above 30°C"],
        A, None),
    ],
  }
}
