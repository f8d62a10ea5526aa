use super::{MetricPoint, encode_batch};
use crate::Result;
use core::time::Duration;
use ohno::{IntoAppError, app_err};
use std::io::{Stdout, Write, stdout};
use url::Url;

const LOG_TARGET: &str = "    writer";

/// Destination for finished points.
pub trait TimeSeriesWriter: Send {
    fn write_many(&mut self, points: &[MetricPoint]) -> impl Future<Output = Result<()>> + Send;

    fn write_one(&mut self, point: &MetricPoint) -> impl Future<Output = Result<()>> + Send {
        self.write_many(core::slice::from_ref(point))
    }

    /// Release the writer once every prior write has been accepted.
    fn close(&mut self) -> impl Future<Output = Result<()>> + Send;
}

/// Writes line protocol to an InfluxDB v2 server.
#[derive(Debug)]
pub struct InfluxWriter {
    client: reqwest::Client,
    write_url: Url,
    token: String,
}

impl InfluxWriter {
    /// Create a writer targeting `bucket` in `org` on the server at `url`.
    pub fn new(url: &str, token: &str, org: &str, bucket: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("savegame-metrics/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .into_app_err("unable to create HTTP client")?;

        Ok(Self {
            client,
            write_url: write_url(url, org, bucket)?,
            token: token.to_string(),
        })
    }
}

/// `{url}/api/v2/write?org=..&bucket=..&precision=ns`
fn write_url(url: &str, org: &str, bucket: &str) -> Result<Url> {
    let base = if url.ends_with('/') { url.to_string() } else { format!("{url}/") };

    let mut write_url = Url::parse(&base)
        .and_then(|u| u.join("api/v2/write"))
        .into_app_err_with(|| format!("invalid InfluxDB URL '{url}'"))?;

    let _ = write_url
        .query_pairs_mut()
        .append_pair("org", org)
        .append_pair("bucket", bucket)
        .append_pair("precision", "ns");

    Ok(write_url)
}

impl TimeSeriesWriter for InfluxWriter {
    async fn write_many(&mut self, points: &[MetricPoint]) -> Result<()> {
        if points.is_empty() {
            return Ok(());
        }

        log::debug!(target: LOG_TARGET, "Writing {} point(s) to InfluxDB", points.len());

        let response = self
            .client
            .post(self.write_url.clone())
            .header(reqwest::header::AUTHORIZATION, format!("Token {}", self.token))
            .header(reqwest::header::CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(encode_batch(points))
            .send()
            .await
            .into_app_err("sending points to InfluxDB")?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(app_err!("InfluxDB rejected write with HTTP status {status}: {}", detail.trim()));
        }

        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        // writes are synchronous requests, so nothing is pending here
        log::debug!(target: LOG_TARGET, "Closing InfluxDB writer");
        Ok(())
    }
}

/// Prints line protocol instead of sending it anywhere.
#[derive(Debug)]
pub struct StdoutWriter<W = Stdout> {
    output: W,
}

impl StdoutWriter {
    #[must_use]
    pub fn new() -> Self {
        Self { output: stdout() }
    }
}

impl Default for StdoutWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write + Send> StdoutWriter<W> {
    #[must_use]
    pub const fn with_output(output: W) -> Self {
        Self { output }
    }

    #[must_use]
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<W: Write + Send> TimeSeriesWriter for StdoutWriter<W> {
    async fn write_many(&mut self, points: &[MetricPoint]) -> Result<()> {
        if points.is_empty() {
            return Ok(());
        }

        writeln!(self.output, "{}", encode_batch(points)).into_app_err("writing points to output")
    }

    async fn close(&mut self) -> Result<()> {
        self.output.flush().into_app_err("flushing output")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{FieldValue, MetricRecord};

    fn point(measurement: &str) -> MetricPoint {
        MetricPoint::from_record_at(MetricRecord::new(measurement).with_field("x", FieldValue::Int(1)), 7).unwrap()
    }

    #[test]
    fn test_write_url() {
        let url = write_url("http://influx:8086", "farm", "fs22").unwrap();
        assert_eq!(url.as_str(), "http://influx:8086/api/v2/write?org=farm&bucket=fs22&precision=ns");

        let url = write_url("https://example.com/influx/", "my org", "b").unwrap();
        assert_eq!(url.as_str(), "https://example.com/influx/api/v2/write?org=my+org&bucket=b&precision=ns");
    }

    #[test]
    fn test_write_url_rejects_garbage() {
        let _ = write_url("not a url", "o", "b").unwrap_err();
    }

    #[tokio::test]
    async fn test_stdout_writer_prints_lines() {
        let mut writer = StdoutWriter::with_output(Vec::new());
        writer.write_many(&[point("a"), point("b")]).await.unwrap();
        writer.write_one(&point("c")).await.unwrap();
        writer.write_many(&[]).await.unwrap();
        writer.close().await.unwrap();

        let text = String::from_utf8(writer.into_output()).unwrap();
        assert_eq!(text, "a x=1i 7\nb x=1i 7\nc x=1i 7\n");
    }
}
