//! Localized validation message templates.
//!
//! Templates use `{field}`, `{min}` and `{max}` placeholders. Tables exist for
//! `en`, `es`, `fr`, `de` and `pt`; any other locale resolves to the English
//! table unless a different default is requested through
//! [`message_table`].

use std::collections::BTreeMap;
use std::fmt;

use vsl_domain::DEFAULT_LOCALE;

/// Keys of a message table, in the order tables are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MessageKey {
    Required,
    Email,
    MinLength,
    MaxLength,
    Pattern,
    Min,
    Max,
    Tel,
}

impl MessageKey {
    pub const ALL: [MessageKey; 8] = [
        MessageKey::Required,
        MessageKey::Email,
        MessageKey::MinLength,
        MessageKey::MaxLength,
        MessageKey::Pattern,
        MessageKey::Min,
        MessageKey::Max,
        MessageKey::Tel,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MessageKey::Required => "required",
            MessageKey::Email => "email",
            MessageKey::MinLength => "minLength",
            MessageKey::MaxLength => "maxLength",
            MessageKey::Pattern => "pattern",
            MessageKey::Min => "min",
            MessageKey::Max => "max",
            MessageKey::Tel => "tel",
        }
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message templates for one locale.
#[derive(Debug, PartialEq, Eq)]
pub struct MessageTable {
    pub locale: &'static str,
    pub required: &'static str,
    pub email: &'static str,
    pub min_length: &'static str,
    pub max_length: &'static str,
    pub pattern: &'static str,
    pub min: &'static str,
    pub max: &'static str,
    pub tel: &'static str,
}

impl MessageTable {
    pub fn template(&self, key: MessageKey) -> &'static str {
        match key {
            MessageKey::Required => self.required,
            MessageKey::Email => self.email,
            MessageKey::MinLength => self.min_length,
            MessageKey::MaxLength => self.max_length,
            MessageKey::Pattern => self.pattern,
            MessageKey::Min => self.min,
            MessageKey::Max => self.max,
            MessageKey::Tel => self.tel,
        }
    }

    /// Renders `key` with `{field}` and any extra placeholders substituted.
    pub fn render(&self, key: MessageKey, field: &str, params: &[(&str, String)]) -> String {
        interpolate(self.template(key), field, params)
    }

    /// Table as a plain key/template map.
    pub fn to_map(&self) -> BTreeMap<&'static str, &'static str> {
        MessageKey::ALL
            .iter()
            .map(|key| (key.as_str(), self.template(*key)))
            .collect()
    }
}

static EN: MessageTable = MessageTable {
    locale: "en",
    required: "{field} is required",
    email: "Please enter a valid email address",
    min_length: "{field} must be at least {min} characters",
    max_length: "{field} must be no more than {max} characters",
    pattern: "Please enter a valid {field}",
    min: "{field} must be at least {min}",
    max: "{field} must be no more than {max}",
    tel: "Please enter a valid phone number",
};

static ES: MessageTable = MessageTable {
    locale: "es",
    required: "{field} es obligatorio",
    email: "Por favor, introduce un correo electrónico válido",
    min_length: "{field} debe tener al menos {min} caracteres",
    max_length: "{field} debe tener como máximo {max} caracteres",
    pattern: "Por favor, introduce un {field} válido",
    min: "{field} debe ser al menos {min}",
    max: "{field} debe ser como máximo {max}",
    tel: "Por favor, introduce un número de teléfono válido",
};

static FR: MessageTable = MessageTable {
    locale: "fr",
    required: "{field} est requis",
    email: "Veuillez entrer une adresse email valide",
    min_length: "{field} doit contenir au moins {min} caractères",
    max_length: "{field} ne doit pas dépasser {max} caractères",
    pattern: "Veuillez entrer un {field} valide",
    min: "{field} doit être au moins {min}",
    max: "{field} ne doit pas dépasser {max}",
    tel: "Veuillez entrer un numéro de téléphone valide",
};

static DE: MessageTable = MessageTable {
    locale: "de",
    required: "{field} ist erforderlich",
    email: "Bitte geben Sie eine gültige E-Mail-Adresse ein",
    min_length: "{field} muss mindestens {min} Zeichen lang sein",
    max_length: "{field} darf maximal {max} Zeichen lang sein",
    pattern: "Bitte geben Sie ein gültiges {field} ein",
    min: "{field} muss mindestens {min} sein",
    max: "{field} darf höchstens {max} sein",
    tel: "Bitte geben Sie eine gültige Telefonnummer ein",
};

static PT: MessageTable = MessageTable {
    locale: "pt",
    required: "{field} é obrigatório",
    email: "Por favor, insira um endereço de email válido",
    min_length: "{field} deve ter pelo menos {min} caracteres",
    max_length: "{field} deve ter no máximo {max} caracteres",
    pattern: "Por favor, insira um {field} válido",
    min: "{field} deve ser pelo menos {min}",
    max: "{field} deve ser no máximo {max}",
    tel: "Por favor, insira um número de telefone válido",
};

static TABLES: [&MessageTable; 5] = [&EN, &ES, &FR, &DE, &PT];

fn lookup(locale: &str) -> Option<&'static MessageTable> {
    TABLES.iter().copied().find(|table| table.locale == locale)
}

/// Locales with a dedicated message table.
pub fn supported_locales() -> impl Iterator<Item = &'static str> {
    TABLES.iter().map(|table| table.locale)
}

/// Table for `locale`, falling back to `default_locale`, then English.
pub fn message_table(locale: &str, default_locale: &str) -> &'static MessageTable {
    lookup(locale)
        .or_else(|| lookup(default_locale))
        .unwrap_or(&EN)
}

/// Table for `locale`, falling back to English.
pub fn get_error_messages(locale: &str) -> &'static MessageTable {
    message_table(locale, DEFAULT_LOCALE)
}

fn interpolate(template: &str, field: &str, params: &[(&str, String)]) -> String {
    let mut message = template.replace("{field}", field);
    for (name, value) in params {
        message = message.replace(&format!("{{{name}}}"), value);
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_table_matches_reference_text() {
        let table = get_error_messages("en");
        let map = table.to_map();
        assert_eq!(map.len(), 8);
        assert_eq!(map["required"], "{field} is required");
        assert_eq!(map["email"], "Please enter a valid email address");
        assert_eq!(map["minLength"], "{field} must be at least {min} characters");
        assert_eq!(map["maxLength"], "{field} must be no more than {max} characters");
        assert_eq!(map["pattern"], "Please enter a valid {field}");
        assert_eq!(map["min"], "{field} must be at least {min}");
        assert_eq!(map["max"], "{field} must be no more than {max}");
        assert_eq!(map["tel"], "Please enter a valid phone number");
    }

    #[test]
    fn unknown_locale_uses_english() {
        assert_eq!(get_error_messages("it"), get_error_messages("en"));
        assert_eq!(get_error_messages("es-MX").locale, "en");
    }

    #[test]
    fn configured_default_is_preferred_over_english() {
        assert_eq!(message_table("it", "de").locale, "de");
        assert_eq!(message_table("it", "xx").locale, "en");
        assert_eq!(message_table("pt", "de").locale, "pt");
    }

    #[test]
    fn render_substitutes_placeholders() {
        let table = get_error_messages("es");
        let message = table.render(MessageKey::MinLength, "Nombre", &[("min", "2".into())]);
        insta::assert_snapshot!(message, @"Nombre debe tener al menos 2 caracteres");
    }

    #[test]
    fn every_table_is_complete() {
        for locale in supported_locales() {
            let table = get_error_messages(locale);
            for key in MessageKey::ALL {
                assert!(!table.template(key).is_empty(), "{locale}.{key}");
            }
        }
    }
}
