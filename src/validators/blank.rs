use std::fmt;

/// Exposes an entity's string-typed fields, in declaration order, so they
/// can be checked without reflection. `None` marks an unset optional field.
pub trait StringFields {
    fn string_fields(&self) -> Vec<(&'static str, Option<&str>)>;
}

/// Every populated field whose trimmed value was empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlankFieldsError {
    pub fields: Vec<&'static str>,
}

impl fmt::Display for BlankFieldsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "The following fields cannot be blank: {}.",
            self.fields.join(", ")
        )
    }
}

impl std::error::Error for BlankFieldsError {}

/// Fails with one combined error naming every whitespace-only field.
pub fn ensure_not_blank<T: StringFields + ?Sized>(entity: &T) -> Result<(), BlankFieldsError> {
    let fields: Vec<&'static str> = entity
        .string_fields()
        .into_iter()
        .filter_map(|(name, value)| match value {
            Some(v) if v.trim().is_empty() => Some(name),
            _ => None,
        })
        .collect();

    if fields.is_empty() {
        Ok(())
    } else {
        Err(BlankFieldsError { fields })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Contact {
        name: String,
        email: Option<String>,
        phone: Option<String>,
    }

    impl StringFields for Contact {
        fn string_fields(&self) -> Vec<(&'static str, Option<&str>)> {
            vec![
                ("name", Some(self.name.as_str())),
                ("email", self.email.as_deref()),
                ("phone", self.phone.as_deref()),
            ]
        }
    }

    #[test]
    fn passes_when_every_field_has_content() {
        let contact = Contact {
            name: "Front desk".into(),
            email: Some("desk@example.com".into()),
            phone: None,
        };
        assert!(ensure_not_blank(&contact).is_ok());
    }

    #[test]
    fn lists_every_blank_field_in_declaration_order() {
        let contact = Contact {
            name: "   ".into(),
            email: None,
            phone: Some("\t".into()),
        };
        let err = ensure_not_blank(&contact).unwrap_err();
        assert_eq!(err.fields, vec!["name", "phone"]);
        assert_eq!(
            err.to_string(),
            "The following fields cannot be blank: name, phone."
        );
    }

    #[test]
    fn empty_string_counts_as_blank() {
        let contact = Contact {
            name: "ok".into(),
            email: Some(String::new()),
            phone: None,
        };
        assert_eq!(ensure_not_blank(&contact).unwrap_err().fields, vec!["email"]);
    }
}
