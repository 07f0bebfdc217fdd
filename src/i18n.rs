//! Localized validation and lookup messages.

use crate::error::ConfigError;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    En,
    De,
    Es,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Message {
    Required,
    NotFound,
    Duplicate,
    InvalidDate,
    FutureDate,
    TelephoneDigits,
    UnknownPetType,
    OwnerIdMismatch,
}

impl Locale {
    /// Picks the first supported language from an `Accept-Language` value, ignoring weights.
    pub fn from_accept_language(header: &str) -> Option<Locale> {
        header
            .split(',')
            .filter_map(|part| part.split(';').next())
            .map(|tag| tag.trim())
            .find_map(|tag| {
                let primary = tag.split('-').next().unwrap_or(tag);
                primary.parse().ok()
            })
    }

    pub fn text(self, message: Message) -> &'static str {
        use Message::*;
        match self {
            Locale::En => match message {
                Required => "must not be blank",
                NotFound => "has not been found",
                Duplicate => "is already in use",
                InvalidDate => "invalid date",
                FutureDate => "must not be in the future",
                TelephoneDigits => "Telephone must be a 10-digit number",
                UnknownPetType => "is not a known pet type",
                OwnerIdMismatch => "The owner ID in the form does not match the URL.",
            },
            Locale::De => match message {
                Required => "darf nicht leer sein",
                NotFound => "wurde nicht gefunden",
                Duplicate => "ist bereits vergeben",
                InvalidDate => "ungültiges Datum",
                FutureDate => "darf nicht in der Zukunft liegen",
                TelephoneDigits => "Telefonnummer muss aus 10 Ziffern bestehen",
                UnknownPetType => "ist keine bekannte Tierart",
                OwnerIdMismatch => "Die Besitzer-ID im Formular stimmt nicht mit der URL überein.",
            },
            Locale::Es => match message {
                Required => "no puede estar vacío",
                NotFound => "no ha sido encontrado",
                Duplicate => "ya se encuentra en uso",
                InvalidDate => "fecha no válida",
                FutureDate => "no puede estar en el futuro",
                TelephoneDigits => "El teléfono debe tener 10 dígitos",
                UnknownPetType => "no es un tipo de mascota conocido",
                OwnerIdMismatch => "El ID del propietario del formulario no coincide con la URL.",
            },
        }
    }
}

impl FromStr for Locale {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "de" => Ok(Locale::De),
            "es" => Ok(Locale::Es),
            other => Err(ConfigError::UnsupportedLocale(other.to_string())),
        }
    }
}
