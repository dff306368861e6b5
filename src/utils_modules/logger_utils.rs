use crate::common::*;

#[doc = "Function to set the global logger: one json object per line on stdout"]
/// # Arguments
/// * `debug` - Raise the log level from info to debug
///
/// # Returns
/// * Result<LoggerHandle, anyhow::Error> - The handle must stay alive for the
///   duration of the program.
pub fn set_global_logger(debug: bool) -> Result<LoggerHandle, anyhow::Error> {
    /* hyper/reqwest 의 통신로그는 제외해준다. */
    let log_spec: &str = if debug {
        "debug, hyper=warn, reqwest=warn"
    } else {
        "info, hyper=warn, reqwest=warn"
    };

    let handle: LoggerHandle = Logger::try_with_str(log_spec)
        .map_err(|e| anyhow!("[set_global_logger] Invalid log specification: {:?}", e))?
        .log_to_stdout()
        .format(json_event_format)
        .start()
        .map_err(|e| anyhow!("[set_global_logger] Failed to start logger: {:?}", e))?;

    Ok(handle)
}

#[doc = "Format function that renders each record as a single json line"]
/// Messages produced by `log_event` are already json objects; anything else is
/// wrapped so plain `info!`/`error!` calls stay machine-readable as well.
pub fn json_event_format(
    w: &mut dyn std::io::Write,
    _now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    let rendered: String = record.args().to_string();

    let mut entry: serde_json::Map<String, Value> = match serde_json::from_str::<Value>(&rendered)
    {
        Ok(Value::Object(map)) => map,
        _ => {
            let mut map = serde_json::Map::new();
            map.insert("event".to_string(), Value::String(rendered));
            map
        }
    };

    entry.insert(
        "level".to_string(),
        Value::String(record.level().to_string().to_lowercase()),
    );
    entry.insert(
        "timestamp".to_string(),
        Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
    );

    write!(w, "{}", Value::Object(entry))
}

#[doc = "Function that emits a structured event with named fields"]
/// # Arguments
/// * `level` - Severity of the event
/// * `event` - Event name, e.g. `refreshed_patterns`
/// * `fields` - Additional fields; must be a json object
pub fn log_event(level: Level, event: &str, fields: Value) {
    let mut entry: serde_json::Map<String, Value> = serde_json::Map::new();
    entry.insert("event".to_string(), Value::String(event.to_string()));

    if let Value::Object(map) = fields {
        for (key, val) in map {
            entry.insert(key, val);
        }
    }

    log::log!(level, "{}", Value::Object(entry));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(level: Level, args: std::fmt::Arguments) -> Value {
        let record: log::Record = log::Record::builder().args(args).level(level).build();

        let mut out: Vec<u8> = Vec::new();
        let mut now: DeferredNow = DeferredNow::new();
        json_event_format(&mut out, &mut now, &record).expect("format");

        serde_json::from_slice(&out).expect("json line")
    }

    #[test]
    fn test_json_event_format_merges_level_and_timestamp() {
        let entry: Value = render(Level::Debug, format_args!(r#"{{"event":"finished"}}"#));

        assert_eq!(entry["event"], "finished");
        assert_eq!(entry["level"], "debug");
        assert!(entry["timestamp"].is_string());
    }

    #[test]
    fn test_json_event_format_wraps_plain_messages() {
        let entry: Value = render(Level::Info, format_args!("Start Kibana pattern refresh"));

        assert_eq!(entry["event"], "Start Kibana pattern refresh");
        assert_eq!(entry["level"], "info");
    }
}
