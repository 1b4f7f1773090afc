//! `wordweave init` — First-time setup.

use wordweave_config::AppConfig;

const SAMPLE_WORDS: &str = r#"[
  ["ba", "na", "na"],
  ["ta", "ble"],
  ["ko", "ra"],
  ["mi", "lo"],
  ["pa", "pa", "ya"],
  ["to", "ma", "to"],
  ["win", "dow"],
  ["gar", "den"]
]
"#;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = AppConfig::config_dir();
    let config_path = config_dir.join("config.toml");
    let words_path = config_dir.join("words.json");

    println!("WordWeave — Setup");
    println!("=================\n");

    if !config_dir.exists() {
        tokio::fs::create_dir_all(&config_dir).await?;
        println!("✅ Created config directory: {}", config_dir.display());
    } else {
        println!("  Config directory exists: {}", config_dir.display());
    }

    if !words_path.exists() {
        tokio::fs::write(&words_path, SAMPLE_WORDS).await?;
        println!("✅ Created sample word list: {}", words_path.display());
    }

    if config_path.exists() {
        println!("\n⚠️  Config already exists at: {}", config_path.display());
        println!("   Edit it manually or delete and re-run init.\n");
    } else {
        let mut config = AppConfig::default();
        config.exercise.word_list = words_path;
        tokio::fs::write(&config_path, config.to_toml()?).await?;
        println!("✅ Created config.toml at: {}", config_path.display());
        println!("\n📝 Next steps:");
        println!("   wordweave simulate --count 3");
        println!("   wordweave serve   (for a host speaking JSON lines)");
    }

    Ok(())
}
