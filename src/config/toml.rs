use super::{ConfigError, SerializableConfig};
use std::{
    fs::{canonicalize, read_to_string},
    path::Path,
};

/// Reads a configuration file following its `extend` chain.
///
/// Each extended file is resolved relative to the file extending it.
pub fn read_config(path: &Path) -> Result<SerializableConfig, ConfigError> {
    let mut paths = vec![canonicalize(path)?];
    let mut config = read_bare_config(path)?;

    while let Some(parent_path) = config.extend() {
        let parent_path = canonicalize(
            paths
                .last()
                .and_then(|path| path.parent())
                .unwrap_or_else(|| Path::new("."))
                .join(parent_path),
        )?;

        if let Some(index) = paths.iter().position(|path| path == &parent_path) {
            paths.push(parent_path);
            return Err(ConfigError::CircularConfigFiles(paths.split_off(index)));
        }

        let mut parent = read_bare_config(&parent_path)?;
        parent.merge(config);
        config = parent;
        paths.push(parent_path);
    }

    Ok(config)
}

fn read_bare_config(path: &Path) -> Result<SerializableConfig, ConfigError> {
    Ok(toml::from_str(&read_to_string(path)?)?)
}
