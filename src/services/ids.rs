use uuid::Uuid;

/// Produces ids like `res-67e55044-10b1-426f-9247-bb680e5fe0c8`.
pub fn next_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

pub fn timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%dT%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique_and_prefixed() {
        let ids: HashSet<String> = (0..1000).map(|_| next_id("res")).collect();

        assert_eq!(ids.len(), 1000);
        assert!(ids.iter().all(|id| id.starts_with("res-")));
    }

    #[test]
    fn test_id_suffix_is_a_uuid() {
        let id = next_id("ath");
        let suffix = id.strip_prefix("ath-").unwrap();
        assert!(Uuid::parse_str(suffix).is_ok());
    }
}
