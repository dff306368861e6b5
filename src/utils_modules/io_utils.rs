use crate::common::*;

#[doc = "Function that substitutes environment variable references in raw config text"]
/// # Arguments
/// * `input` - Raw text possibly containing `$VAR` / `${VAR}` references
///
/// # Returns
/// * String - Text with every known variable substituted. Unknown variables
///   are left as written, never replaced with an empty string.
pub fn expand_env_vars(input: &str) -> String {
    let mut expanded: String = String::with_capacity(input.len());
    let mut rest: &str = input;

    while let Some(pos) = rest.find('$') {
        expanded.push_str(&rest[..pos]);
        let tail: &str = &rest[pos + 1..];

        /* ${VAR} form */
        if let Some(inner) = tail.strip_prefix('{') {
            match inner.find('}') {
                Some(end) => {
                    let name: &str = &inner[..end];
                    match std::env::var(name) {
                        Ok(val) => expanded.push_str(&val),
                        Err(_) => {
                            expanded.push_str("${");
                            expanded.push_str(name);
                            expanded.push('}');
                        }
                    }
                    rest = &inner[end + 1..];
                }
                None => {
                    expanded.push('$');
                    rest = tail;
                }
            }
            continue;
        }

        /* $VAR form */
        let name_len: usize = tail
            .bytes()
            .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
            .count();

        if name_len == 0 {
            expanded.push('$');
            rest = tail;
            continue;
        }

        let name: &str = &tail[..name_len];
        match std::env::var(name) {
            Ok(val) => expanded.push_str(&val),
            Err(_) => {
                expanded.push('$');
                expanded.push_str(name);
            }
        }
        rest = &tail[name_len..];
    }

    expanded.push_str(rest);
    expanded
}

#[doc = "Function that reads a yaml file into an object, expanding environment variables first"]
/// # Arguments
/// * `file_path` - Path of the yaml file to read
///
/// # Returns
/// * Result<T, anyhow::Error>
pub fn read_yaml_from_file<T: DeserializeOwned>(file_path: &Path) -> Result<T, anyhow::Error> {
    let yaml_content: String = std::fs::read_to_string(file_path).map_err(|e| {
        anyhow!(
            "[read_yaml_from_file] Failed to read '{}': {:?}",
            file_path.display(),
            e
        )
    })?;

    let yaml_content: String = expand_env_vars(&yaml_content);

    let parsed: T = serde_yaml::from_str(&yaml_content).map_err(|e| {
        anyhow!(
            "[read_yaml_from_file] Failed to parse '{}': {:?}",
            file_path.display(),
            e
        )
    })?;

    Ok(parsed)
}
