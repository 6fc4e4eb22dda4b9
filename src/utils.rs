pub type IntentName = String;
pub type EntityName = String;

const BUILTIN_ENTITY_PREFIX: &str = "snips/";

pub fn is_builtin_entity(entity_name: &str) -> bool {
    entity_name.starts_with(BUILTIN_ENTITY_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_builtin_entity_works() {
        assert!(is_builtin_entity("snips/datetime"));
        assert!(is_builtin_entity("snips/number"));
        assert!(!is_builtin_entity("city"));
        assert!(!is_builtin_entity("my_snips/entity"));
    }
}
