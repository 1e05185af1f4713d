use crate::error::FormatError;
use serde::{Deserialize, Serialize};

/// One parsed log line, in the shape the ingestion endpoint expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    pub application_id: String,
    pub log_level: String,
    /// Copied verbatim from the line, never interpreted.
    pub timestamp: String,
    pub log_message: String,
}

const MESSAGE_SEPARATOR: &str = ": ";
const BRACKET_DELIMITER: &str = "] [";
const BRACKETS: [char; 2] = ['[', ']'];

/// Parses `[<timestamp>] [<level>]: <message>` into a [`LogRecord`].
///
/// Only the first `": "` splits metadata from message, so the message may
/// itself contain colons. Timestamp and level are trimmed of surrounding
/// brackets but otherwise accepted as-is, including empty values.
pub fn parse_line(line: &str, application_id: &str) -> Result<LogRecord, FormatError> {
    let (meta, message) = line
        .split_once(MESSAGE_SEPARATOR)
        .ok_or(FormatError::MissingSeparator)?;

    let (timestamp, level) = meta
        .split_once(BRACKET_DELIMITER)
        .ok_or(FormatError::MissingBracketDelimiter)?;

    Ok(LogRecord {
        application_id: application_id.to_string(),
        log_level: level.trim_matches(BRACKETS).to_string(),
        timestamp: timestamp.trim_matches(BRACKETS).to_string(),
        log_message: message.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_line() {
        let record = parse_line("[2024-01-01T10:00:00Z] [INFO]: server started", "seata").unwrap();

        assert_eq!(
            record,
            LogRecord {
                application_id: "seata".to_string(),
                log_level: "INFO".to_string(),
                timestamp: "2024-01-01T10:00:00Z".to_string(),
                log_message: "server started".to_string(),
            }
        );
    }

    #[test]
    fn keeps_message_whitespace() {
        let record = parse_line("[ts] [WARN]:   spaced \t out  ", "app").unwrap();
        assert_eq!(record.log_message, "  spaced \t out  ");
    }

    #[test]
    fn splits_on_first_separator_only() {
        let record = parse_line("[ts] [ERROR]: db: connection: refused", "app").unwrap();
        assert_eq!(record.log_level, "ERROR");
        assert_eq!(record.log_message, "db: connection: refused");
    }

    #[test]
    fn accepts_empty_message() {
        let record = parse_line("[ts] [DEBUG]: ", "app").unwrap();
        assert_eq!(record.log_message, "");
    }

    #[test]
    fn accepts_empty_level_and_arbitrary_timestamp() {
        let record = parse_line("[not a date] []: msg", "app").unwrap();
        assert_eq!(record.timestamp, "not a date");
        assert_eq!(record.log_level, "");
    }

    #[test]
    fn trims_repeated_brackets() {
        let record = parse_line("[[ts]] [[INFO]]: msg", "app").unwrap();
        assert_eq!(record.timestamp, "ts");
        assert_eq!(record.log_level, "INFO");
    }

    #[test]
    fn rejects_line_without_separator() {
        assert_eq!(
            parse_line("this is not a log line", "app"),
            Err(FormatError::MissingSeparator)
        );
    }

    #[test]
    fn rejects_line_without_bracket_delimiter() {
        assert_eq!(
            parse_line("2024-01-01 INFO: started", "app"),
            Err(FormatError::MissingBracketDelimiter)
        );
    }

    #[test]
    fn serializes_to_ingestion_shape() {
        let record = parse_line("[2024-01-01T10:00:00Z] [INFO]: server started", "seata").unwrap();
        let json = serde_json::to_string(&record).unwrap();

        assert_eq!(
            json,
            r#"{"application_id":"seata","log_level":"INFO","timestamp":"2024-01-01T10:00:00Z","log_message":"server started"}"#
        );

        let back: LogRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
