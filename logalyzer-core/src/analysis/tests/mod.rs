mod parse_tests;
mod source_tests;

/// Build a log line in the `ui_short` format.
pub(crate) fn log_line(url: &str, request_time: &str) -> String {
    format!(
        r#"1.196.116.32 -  - [29/Jun/2017:03:50:22 +0300] "GET {url} HTTP/1.1" 200 927 "-" "Lynx/2.8.8dev.9 libwww-FM/2.14 SSL-MM/1.4.1 GNUTLS/2.10.5" "-" "1498697422-2190034393-4708-9752759" "dc7161be3" {request_time}"#
    )
}
