//! CLI commands

use std::collections::HashMap;

use colored::Colorize;

use super::CliError;
use crate::allocator::KeyAllocator;
use crate::config::StaticConfig;
use crate::storage::MappingStore;

/// 校验在分配器内完成，`Validation` 经由 `From` 转为 `CliError::InvalidUrl`
pub async fn add_link(allocator: &KeyAllocator, target_url: &str) -> Result<(), CliError> {
    let key = allocator.allocate_and_store(target_url).await?;
    println!(
        "{} Added short link: {} -> {}",
        "✓".bold().green(),
        key.cyan(),
        target_url.blue().underline()
    );
    Ok(())
}

pub async fn get_link(store: &dyn MappingStore, key: &str) -> Result<(), CliError> {
    if key.is_empty() {
        return Err(CliError::CommandError("key cannot be empty".to_string()));
    }

    let target = store.get(key).await;
    if target.is_empty() {
        return Err(CliError::NotFound(format!(
            "Short URL for key: '{}' not found",
            key
        )));
    }

    println!("{}", target);
    Ok(())
}

/// Render all mappings as a JSON object, keys sorted.
pub fn render_links_json(links: &HashMap<String, String>) -> crate::errors::Result<String> {
    let sorted: std::collections::BTreeMap<_, _> = links.iter().collect();
    Ok(serde_json::to_string_pretty(&sorted)?)
}

pub async fn list_links(store: &dyn MappingStore, json: bool) -> Result<(), CliError> {
    let links = store.get_all().await;

    if json {
        println!("{}", render_links_json(&links)?);
        return Ok(());
    }

    if links.is_empty() {
        println!("{} No short links found", "ℹ".bold().blue());
    } else {
        println!("{}", "Short link list:".bold().green());
        println!();
        let mut entries: Vec<_> = links.iter().collect();
        entries.sort();
        for (key, target) in entries {
            println!("  {} -> {}", key.cyan(), target.blue().underline());
        }
        println!();
        println!(
            "{} Total {} short links",
            "ℹ".bold().blue(),
            links.len().to_string().green()
        );
    }
    Ok(())
}

pub async fn count_links(store: &dyn MappingStore) -> Result<(), CliError> {
    println!("{}", store.len().await);
    Ok(())
}

pub fn generate_config(output_path: Option<&str>) -> Result<(), CliError> {
    let path = output_path.unwrap_or("config.example.toml");
    StaticConfig::default()
        .save_to_file(path)
        .map_err(|e| CliError::CommandError(format!("Failed to write {}: {}", path, e)))?;

    println!(
        "{} Sample configuration written to {}",
        "✓".bold().green(),
        path.cyan()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocator::SequenceGenerator;
    use crate::errors::ShortenerError;
    use crate::storage::MemoryStore;
    use std::sync::Arc;

    #[test]
    fn test_render_links_json_sorted() {
        let mut links = HashMap::new();
        links.insert("bbbbbbbb".to_string(), "https://b.example".to_string());
        links.insert("aaaaaaaa".to_string(), "https://a.example".to_string());

        let json = render_links_json(&links).unwrap();
        let a = json.find("aaaaaaaa").unwrap();
        let b = json.find("bbbbbbbb").unwrap();
        assert!(a < b);

        let parsed: HashMap<String, String> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, links);
    }

    #[tokio::test]
    async fn test_add_rejects_bad_url() {
        let store = Arc::new(MemoryStore::new());
        let generator = Arc::new(SequenceGenerator::new(["aaaaaaaa"]));
        let allocator = KeyAllocator::new(generator.clone(), store.clone());

        let err = add_link(&allocator, "not a url").await.unwrap_err();
        assert_eq!(
            err.format_simple(),
            "Invalid URL: URL must be absolute (scheme:...) or start with '/'"
        );
        let err = add_link(&allocator, "").await.unwrap_err();
        assert_eq!(err.format_simple(), "Invalid URL: URL cannot be empty");

        assert_eq!(generator.calls(), 0);
        assert_eq!(store.len().await, 0);
    }

    #[test]
    fn test_serialization_error_maps_to_command_error() {
        let err: CliError = ShortenerError::from(
            serde_json::from_str::<HashMap<String, String>>("{").unwrap_err(),
        )
        .into();
        match err {
            CliError::CommandError(msg) => assert!(msg.starts_with("Serialization Error")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let store = MemoryStore::new();
        let err = get_link(&store, "nothere1").await.unwrap_err();
        assert_eq!(err.format_simple(), "Short URL for key: 'nothere1' not found");
    }

    #[tokio::test]
    async fn test_add_then_get() {
        let store = Arc::new(MemoryStore::new());
        let allocator = KeyAllocator::with_default_generator(store.clone());
        add_link(&allocator, "https://example.com/page").await.unwrap();

        let all = store.get_all().await;
        let (key, _) = all.iter().next().unwrap();
        assert!(get_link(store.as_ref(), key).await.is_ok());
    }
}
