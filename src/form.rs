//! Create/edit form drafts

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::{Pokemon, PokemonData};

/// Most types a new Pokemon may be given
pub const MAX_TYPES: usize = 3;
pub const MAX_NUMBER: u32 = 1000;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Name is required")]
    MissingName,
    #[error("Ability is required")]
    MissingAbility,
    #[error("Add at least one type")]
    MissingType,
    #[error("Number must be between 1 and {MAX_NUMBER}")]
    InvalidNumber,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum FormField {
    #[default]
    Name,
    Number,
    Types,
    Ability,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Name,
        FormField::Number,
        FormField::Types,
        FormField::Ability,
    ];

    pub fn next(self) -> Self {
        match self {
            FormField::Name => FormField::Number,
            FormField::Number => FormField::Types,
            FormField::Types => FormField::Ability,
            FormField::Ability => FormField::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Name => FormField::Ability,
            FormField::Number => FormField::Name,
            FormField::Types => FormField::Number,
            FormField::Ability => FormField::Types,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Number => "Number",
            FormField::Types => "Types",
            FormField::Ability => "Ability",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum FormMode {
    Create,
    /// Editing the entity with this id
    Edit(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PokemonForm {
    pub mode: FormMode,
    pub name: String,
    /// Raw text of the number field (digits only)
    pub number: String,
    pub types: Vec<String>,
    /// Type being typed, not yet added
    pub type_input: String,
    pub ability: String,
    pub focus: FormField,
}

impl PokemonForm {
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            name: String::new(),
            number: String::new(),
            types: Vec::new(),
            type_input: String::new(),
            ability: String::new(),
            focus: FormField::Name,
        }
    }

    pub fn edit(pokemon: &Pokemon) -> Self {
        Self {
            mode: FormMode::Edit(pokemon.id.clone()),
            name: pokemon.name.clone(),
            number: pokemon.number.to_string(),
            types: pokemon.types.clone(),
            type_input: String::new(),
            ability: pokemon.ability.clone(),
            focus: FormField::Name,
        }
    }

    pub fn is_create(&self) -> bool {
        self.mode == FormMode::Create
    }

    pub fn input(&mut self, ch: char) {
        match self.focus {
            FormField::Name => self.name.push(ch),
            FormField::Number => {
                if ch.is_ascii_digit() && self.number.len() < 9 {
                    self.number.push(ch);
                }
            }
            FormField::Types => self.type_input.push(ch),
            FormField::Ability => self.ability.push(ch),
        }
    }

    /// Delete one character. On the types field with nothing typed, drop
    /// the last added type instead.
    pub fn backspace(&mut self) {
        match self.focus {
            FormField::Name => {
                self.name.pop();
            }
            FormField::Number => {
                self.number.pop();
            }
            FormField::Types => {
                if self.type_input.pop().is_none() {
                    self.types.pop();
                }
            }
            FormField::Ability => {
                self.ability.pop();
            }
        }
    }

    pub fn can_add_type(&self) -> bool {
        let candidate = self.type_input.trim().to_lowercase();
        !candidate.is_empty()
            && !self.types.contains(&candidate)
            && !(self.is_create() && self.types.len() >= MAX_TYPES)
    }

    /// Move the typed type into the list: trimmed, lower-cased, no
    /// duplicates, and capped at [`MAX_TYPES`] for new entries.
    pub fn add_type(&mut self) -> bool {
        if !self.can_add_type() {
            return false;
        }
        let candidate = self.type_input.trim().to_lowercase();
        self.types.push(candidate);
        self.type_input.clear();
        true
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Build the request body, or say what is missing.
    pub fn submission(&self) -> Result<PokemonData, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::MissingName);
        }
        let ability = self.ability.trim();
        let number = self.number.trim().parse::<u32>().ok();

        match self.mode {
            FormMode::Create => {
                let number = number
                    .filter(|n| (1..=MAX_NUMBER).contains(n))
                    .ok_or(FormError::InvalidNumber)?;
                if self.types.is_empty() {
                    return Err(FormError::MissingType);
                }
                if ability.is_empty() {
                    return Err(FormError::MissingAbility);
                }
                Ok(PokemonData {
                    name: name.to_lowercase(),
                    number,
                    types: self.types.clone(),
                    ability: ability.to_string(),
                })
            }
            FormMode::Edit(_) => Ok(PokemonData {
                name: name.to_string(),
                number: number.unwrap_or(0),
                types: self.types.clone(),
                ability: ability.to_string(),
            }),
        }
    }
}
