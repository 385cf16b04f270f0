use crate::{MAX_IDENT_LEN, validate::reserved::is_reserved_word};

/// Ensure an identifier is non-empty, well-formed and not a reserved keyword.
pub(crate) fn validate_ident(ident: &str) -> Result<(), String> {
    if ident.is_empty() {
        return Err("ident is empty".to_string());
    }
    if ident.len() > MAX_IDENT_LEN {
        return Err(format!(
            "ident '{ident}' exceeds max length {MAX_IDENT_LEN}"
        ));
    }

    let mut chars = ident.chars();
    let starts_ok = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if !starts_ok || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(format!("ident '{ident}' is not a valid identifier"));
    }

    if is_reserved_word(ident) {
        return Err(format!("the word '{ident}' is reserved"));
    }

    Ok(())
}

/// Ensure a dotted namespace is made of valid identifiers.
pub(crate) fn validate_namespace(namespace: &str) -> Result<(), String> {
    if namespace.is_empty() {
        return Err("namespace is empty".to_string());
    }

    namespace
        .split('.')
        .try_for_each(validate_ident)
        .map_err(|e| format!("namespace '{namespace}': {e}"))
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rejects_empty_malformed_and_reserved_words() {
        assert!(validate_ident("").is_err(), "empty identifiers should fail");
        assert!(validate_ident("9lives").is_err());
        assert!(validate_ident("has space").is_err());
        assert!(
            validate_ident("class").is_err(),
            "reserved keywords should be rejected"
        );
    }

    #[test]
    fn accepts_non_reserved_identifier() {
        assert!(validate_ident("ExternalId").is_ok());
        assert!(validate_ident("_weight2").is_ok());
    }

    #[test]
    fn namespaces_are_checked_per_segment() {
        assert!(validate_namespace("MyProduct.Data.Entities").is_ok());
        assert!(validate_namespace("MyProduct..Entities").is_err());
        assert!(validate_namespace("MyProduct.namespace").is_err());
    }

    proptest! {
        #[test]
        fn capitalized_identifiers_are_accepted(ident in "[A-Z_][A-Za-z0-9_]{0,40}") {
            prop_assert!(validate_ident(&ident).is_ok());
        }

        #[test]
        fn punctuation_is_rejected(head in "[A-Za-z]{1,8}", bad in "[-.+ <>?]", tail in "[a-z]{0,8}") {
            let ident = format!("{head}{bad}{tail}");
            prop_assert!(validate_ident(&ident).is_err());
        }
    }
}
