use crate::analysis::types::{ParseError, ParseOutcome, ParsedLine};
use once_cell::sync::Lazy;
use regex::Regex;

// log_format ui_short '$remote_addr $remote_user $http_x_real_ip [$time_local] "$request" '
//                     '$status $body_bytes_sent "$http_referer" '
//                     '"$http_user_agent" "$http_x_forwarded_for" "$http_X_REQUEST_ID" "$http_X_RB_USER" '
//                     '$request_time';
static REQUEST_FIELD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\S+ .*?\[[^\]]*\] "([^"]*)""#).expect("request field pattern is valid")
});

/// Parse one access log line into its request url and trailing request time.
///
/// The url is the token following the HTTP method inside the quoted request
/// field. The request time is the last whitespace-delimited token on the line
/// and must be a plain non-negative decimal (`0.863`, `12`, `.5`).
pub fn parse_line(line: &str) -> ParseOutcome {
    let line = line.trim_end();

    let captures = REQUEST_FIELD
        .captures(line)
        .ok_or(ParseError::MissingRequest)?;

    let request = captures.get(1).ok_or(ParseError::MissingRequest)?;
    let url = parse_request(request.as_str())?;

    // The closing quote of the request field ends the whole match.
    let rest = captures
        .get(0)
        .map(|m| &line[m.end()..])
        .unwrap_or_default();

    let token = rest
        .split_whitespace()
        .next_back()
        .ok_or(ParseError::MissingResponseTime)?;

    Ok(ParsedLine {
        url: url.to_string(),
        response_time: parse_response_time(token)?,
    })
}

/// `<METHOD> <url> HTTP/<ver>` -> `<url>`
fn parse_request(request: &str) -> Result<&str, ParseError> {
    let mut parts = request.split_whitespace();

    let (Some(_method), Some(url), Some(version)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(ParseError::MalformedRequest {
            request: request.to_string(),
        });
    };

    if !version.starts_with("HTTP/") {
        return Err(ParseError::MalformedRequest {
            request: request.to_string(),
        });
    }

    Ok(url)
}

fn parse_response_time(token: &str) -> Result<f64, ParseError> {
    let invalid = || ParseError::InvalidResponseTime {
        token: token.to_string(),
    };

    let is_decimal = token.bytes().any(|b| b.is_ascii_digit())
        && token.bytes().all(|b| b.is_ascii_digit() || b == b'.');
    if !is_decimal {
        return Err(invalid());
    }

    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(invalid()),
    }
}
