// Copyright (C) 2026  winnyboy5
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
//! Exposition text: the output of a scrape and a reader for it.

use std::collections::BTreeSet;

use crate::error::{MetricsError, MetricsResult};
use crate::types::{MetricKind, MetricSample};

/// One encoded scrape
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exposition {
    body: String,
    content_type: &'static str,
}

impl Exposition {
    /// Wrap encoded text and its content type
    pub fn new(body: String, content_type: &'static str) -> Self {
        Self { body, content_type }
    }

    /// Encoded text
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Content type to send with the body
    pub fn content_type(&self) -> &'static str {
        self.content_type
    }

    /// Take the encoded text
    pub fn into_body(self) -> String {
        self.body
    }

    /// Samples contained in the body
    pub fn samples(&self) -> MetricsResult<Vec<MetricSample>> {
        parse_exposition(&self.body)
    }

    /// Distinct sample names in the body
    pub fn metric_names(&self) -> MetricsResult<BTreeSet<String>> {
        Ok(self.samples()?.into_iter().map(|s| s.name).collect())
    }
}

/// Parse Prometheus text format into samples.
///
/// `# HELP` and free comments are skipped. A sample takes its kind from the
/// last `# TYPE` line if it belongs to that family, else it is untyped.
pub fn parse_exposition(text: &str) -> MetricsResult<Vec<MetricSample>> {
    let mut samples = Vec::new();
    let mut family: Option<(String, MetricKind)> = None;

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(comment) = line.strip_prefix('#') {
            let mut tokens = comment.split_whitespace();
            if tokens.next() == Some("TYPE") {
                let name = tokens
                    .next()
                    .ok_or_else(|| parse_error(line_no, "TYPE line without metric name"))?;
                let kind = tokens
                    .next()
                    .ok_or_else(|| parse_error(line_no, "TYPE line without type"))?
                    .parse::<MetricKind>()
                    .map_err(|reason| parse_error(line_no, reason))?;
                family = Some((name.to_string(), kind));
            }
            continue;
        }

        let (name, labels, value) =
            parse_sample_line(line).map_err(|reason| parse_error(line_no, reason))?;
        let kind = match &family {
            Some((family_name, kind)) if belongs_to(&name, family_name, *kind) => *kind,
            _ => MetricKind::Untyped,
        };

        samples.push(MetricSample {
            name,
            labels,
            value,
            kind,
        });
    }

    Ok(samples)
}

fn parse_error(line: usize, reason: impl Into<String>) -> MetricsError {
    MetricsError::Parse {
        line,
        reason: reason.into(),
    }
}

fn belongs_to(sample: &str, family: &str, kind: MetricKind) -> bool {
    if sample == family {
        return true;
    }
    match kind {
        MetricKind::Histogram | MetricKind::Summary => sample
            .strip_prefix(family)
            .is_some_and(|suffix| matches!(suffix, "_bucket" | "_sum" | "_count")),
        _ => false,
    }
}

type ParsedSample = (String, Vec<(String, String)>, f64);

fn parse_sample_line(line: &str) -> Result<ParsedSample, String> {
    let name_len = line
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == ':'))
        .unwrap_or(line.len());
    let name = &line[..name_len];
    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(format!("invalid metric name in '{}'", line));
    }

    let mut rest = &line[name_len..];
    let labels = if let Some(after_brace) = rest.strip_prefix('{') {
        let (labels, remaining) = parse_labels(after_brace)?;
        rest = remaining;
        labels
    } else {
        Vec::new()
    };

    if !rest.starts_with(char::is_whitespace) {
        return Err(format!("expected whitespace before value of '{}'", name));
    }

    let mut tokens = rest.split_whitespace();
    let value = tokens
        .next()
        .ok_or_else(|| format!("missing value for '{}'", name))
        .and_then(parse_value)?;
    if let Some(timestamp) = tokens.next() {
        timestamp
            .parse::<i64>()
            .map_err(|_| format!("invalid timestamp '{}'", timestamp))?;
    }
    if let Some(extra) = tokens.next() {
        return Err(format!("unexpected token '{}'", extra));
    }

    Ok((name.to_string(), labels, value))
}

/// Parse `key="value",...}` and return the text after the closing brace.
fn parse_labels(mut input: &str) -> Result<(Vec<(String, String)>, &str), String> {
    let mut labels = Vec::new();

    loop {
        input = input.trim_start();
        if let Some(rest) = input.strip_prefix('}') {
            return Ok((labels, rest));
        }

        let key_len = input
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .ok_or("unterminated label set")?;
        if key_len == 0 {
            return Err(format!("invalid label name at '{}'", input));
        }
        let key = &input[..key_len];

        input = input[key_len..]
            .trim_start()
            .strip_prefix('=')
            .ok_or_else(|| format!("expected '=' after label '{}'", key))?
            .trim_start()
            .strip_prefix('"')
            .ok_or_else(|| format!("expected quoted value for label '{}'", key))?;

        let mut value = String::new();
        let mut chars = input.char_indices();
        let mut closed_at = None;
        while let Some((i, c)) = chars.next() {
            match c {
                '"' => {
                    closed_at = Some(i);
                    break;
                }
                '\\' => match chars.next() {
                    Some((_, 'n')) => value.push('\n'),
                    Some((_, '\\')) => value.push('\\'),
                    Some((_, '"')) => value.push('"'),
                    Some((_, other)) => return Err(format!("invalid escape '\\{}'", other)),
                    None => break,
                },
                other => value.push(other),
            }
        }
        let closed_at =
            closed_at.ok_or_else(|| format!("unterminated value for label '{}'", key))?;
        labels.push((key.to_string(), value));

        input = input[closed_at + 1..].trim_start();
        if let Some(rest) = input.strip_prefix(',') {
            input = rest;
        } else if !input.starts_with('}') {
            return Err(format!("expected ',' or '}}' after label '{}'", key));
        }
    }
}

fn parse_value(token: &str) -> Result<f64, String> {
    match token {
        "+Inf" | "Inf" => Ok(f64::INFINITY),
        "-Inf" => Ok(f64::NEG_INFINITY),
        "NaN" => Ok(f64::NAN),
        other => other
            .parse::<f64>()
            .map_err(|_| format!("invalid sample value '{}'", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = "\
# HELP process_cpu_seconds_total Total user and system CPU time spent in seconds.
# TYPE process_cpu_seconds_total counter
process_cpu_seconds_total 0.42
# HELP beacon_build_info Build information, value is always 1
# TYPE beacon_build_info gauge
beacon_build_info{version=\"0.1.0\"} 1
# HELP request_seconds Request latency
# TYPE request_seconds histogram
request_seconds_bucket{le=\"0.1\"} 3
request_seconds_bucket{le=\"+Inf\"} 4
request_seconds_sum 0.9
request_seconds_count 4
# HELP rpc_seconds RPC latency
# TYPE rpc_seconds summary
rpc_seconds{quantile=\"0.5\"} 0.2
rpc_seconds{quantile=\"0.99\"} 0.8
rpc_seconds_sum 1.5
rpc_seconds_count 7
";

    #[test]
    fn test_parse_snapshot() {
        let samples = parse_exposition(SNAPSHOT).unwrap();
        assert_eq!(samples.len(), 10);

        assert_eq!(samples[0].name, "process_cpu_seconds_total");
        assert_eq!(samples[0].kind, MetricKind::Counter);
        assert_eq!(samples[0].value, 0.42);
        assert!(samples[0].labels.is_empty());

        assert_eq!(samples[1].label("version"), Some("0.1.0"));
        assert_eq!(samples[1].kind, MetricKind::Gauge);

        assert_eq!(samples[3].label("le"), Some("+Inf"));
        assert!(samples[2..6].iter().all(|s| s.kind == MetricKind::Histogram));
    }

    #[test]
    fn test_summary_samples_take_summary_kind() {
        let samples = parse_exposition(SNAPSHOT).unwrap();
        let summary: Vec<&MetricSample> = samples
            .iter()
            .filter(|s| s.name.starts_with("rpc_seconds"))
            .collect();

        assert_eq!(summary.len(), 4);
        assert!(summary.iter().all(|s| s.kind == MetricKind::Summary));
        assert_eq!(summary[0].label("quantile"), Some("0.5"));
        assert_eq!(summary[2].name, "rpc_seconds_sum");
        assert_eq!(summary[3].name, "rpc_seconds_count");
        assert_eq!(summary[3].value, 7.0);
    }

    #[test]
    fn test_parse_special_values_and_timestamp() {
        let samples = parse_exposition("a +Inf\nb -Inf\nc NaN\nd 1.5e3 1700000000000\n").unwrap();
        assert_eq!(samples[0].value, f64::INFINITY);
        assert_eq!(samples[1].value, f64::NEG_INFINITY);
        assert!(samples[2].value.is_nan());
        assert_eq!(samples[3].value, 1500.0);
        assert!(samples.iter().all(|s| s.kind == MetricKind::Untyped));
    }

    #[test]
    fn test_parse_label_escapes() {
        let samples =
            parse_exposition(r#"m{path="C:\\tmp",quote="say \"hi\"",nl="a\nb",} 1"#).unwrap();
        let sample = &samples[0];
        assert_eq!(sample.label("path"), Some("C:\\tmp"));
        assert_eq!(sample.label("quote"), Some("say \"hi\""));
        assert_eq!(sample.label("nl"), Some("a\nb"));
    }

    #[test]
    fn test_type_does_not_leak_to_other_families() {
        let samples = parse_exposition("# TYPE a counter\na 1\nb 2\n").unwrap();
        assert_eq!(samples[0].kind, MetricKind::Counter);
        assert_eq!(samples[1].kind, MetricKind::Untyped);
    }

    #[test]
    fn test_parse_errors_report_line() {
        let err = parse_exposition("ok 1\nbroken{le=\"1\" 2\n").unwrap_err();
        assert!(matches!(err, MetricsError::Parse { line: 2, .. }));

        assert!(parse_exposition("novalue\n").is_err());
        assert!(parse_exposition("1bad 1\n").is_err());
        assert!(parse_exposition("m abc\n").is_err());
        assert!(parse_exposition("m 1 2 3\n").is_err());
        assert!(parse_exposition("# TYPE m meter\n").is_err());
    }

    #[test]
    fn test_metric_names() {
        let exposition = Exposition::new(SNAPSHOT.to_string(), "text/plain; version=0.0.4");
        let names = exposition.metric_names().unwrap();
        assert!(names.contains("process_cpu_seconds_total"));
        assert!(names.contains("request_seconds_bucket"));
        assert_eq!(names.len(), 8);
    }
}
