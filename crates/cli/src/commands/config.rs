use rebate_core::config::{AppConfig, LoadOptions, ValueSource};

pub fn run(options: &LoadOptions) -> String {
    let (config, sources) = match AppConfig::load_with_sources(options.clone()) {
        Ok(loaded) => loaded,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let catalog_path = config
        .catalog
        .path
        .as_deref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "<built-in>".to_string());

    [
        "effective config (source precedence: override > env > file > default):".to_string(),
        render_line("logging.level", &config.logging.level, &sources.log_level),
        render_line("logging.format", &format!("{:?}", config.logging.format), &sources.log_format),
        render_line("catalog.path", &catalog_path, &sources.catalog_path),
    ]
    .join("\n")
}

fn render_line(key: &str, value: &str, source: &ValueSource) -> String {
    format!("- {key} = {value} (source: {source})")
}
