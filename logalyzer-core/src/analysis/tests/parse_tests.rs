use super::log_line;
use crate::analysis::{ParseError, ParsedLine, parse_line};
use pretty_assertions::assert_eq;

#[test]
fn parse_line_extracts_url_and_request_time() {
    // Arrange
    let line = r#"1.138.198.128 -  - [30/Jun/2017:03:28:23 +0300] "GET /api/v2/banner/25949683 HTTP/1.1" 200 1261 "-" "python-requests/2.8.1" "-" "1498782502-440360380-4707-10488740" "4e9627334" 0.863"#;

    // Act
    let parsed = parse_line(line).unwrap();

    // Assert
    assert_eq!(
        parsed,
        ParsedLine {
            url: "/api/v2/banner/25949683".to_string(),
            response_time: 0.863,
        }
    );
}

#[test]
fn parse_line_keeps_query_string_in_url() {
    let line = log_line("/api/v2/slot/4705/groups?date=2017-06-29&limit=10", "0.146");

    let parsed = parse_line(&line).unwrap();

    assert_eq!(parsed.url, "/api/v2/slot/4705/groups?date=2017-06-29&limit=10");
    assert_eq!(parsed.response_time, 0.146);
}

#[test]
fn parse_line_accepts_other_methods_and_integer_times() {
    let line = log_line("/upload", "12").replace("\"GET ", "\"POST ");

    let parsed = parse_line(&line).unwrap();

    assert_eq!(parsed.url, "/upload");
    assert_eq!(parsed.response_time, 12.0);
}

#[test]
fn parse_line_ignores_trailing_whitespace() {
    let line = format!("{}\r\n", log_line("/a", "0.5"));

    let parsed = parse_line(&line).unwrap();

    assert_eq!(parsed.response_time, 0.5);
}

#[test]
fn parse_line_rejects_line_without_client_prefix() {
    let line = r#"[30/Jun/2017:03:28:23 +0300] "GET /api/v2/banner/25949683 HTTP/1.1""#;

    assert_eq!(parse_line(line), Err(ParseError::MissingRequest));
}

#[test]
fn parse_line_rejects_line_ending_at_request() {
    let line = r#"1.138.198.128 -  - [30/Jun/2017:03:28:23 +0300] "GET /api/v2/banner/25949683 HTTP/1.1""#;

    assert_eq!(parse_line(line), Err(ParseError::MissingResponseTime));
}

#[test]
fn parse_line_rejects_malformed_request() {
    let line = log_line("", "0.1").replace("\"GET  HTTP/1.1\"", "\"0\"");

    assert!(matches!(
        parse_line(&line),
        Err(ParseError::MalformedRequest { .. })
    ));
}

#[test]
fn parse_line_rejects_non_numeric_request_time() {
    for token in ["-", "abc", "1.2.3", "-0.5", "1e3", "inf", "NaN", "+1"] {
        let line = log_line("/a", token);

        assert_eq!(
            parse_line(&line),
            Err(ParseError::InvalidResponseTime {
                token: token.to_string()
            }),
            "token {token:?} must be rejected"
        );
    }
}

#[test]
fn parse_line_never_panics_on_garbage() {
    for line in ["", " ", "\"", "[]", "a [b] \"", "x [y] \"GET\" 1", "\u{fffd}\u{fffd}"] {
        assert!(parse_line(line).is_err(), "{line:?} must not parse");
    }
}
