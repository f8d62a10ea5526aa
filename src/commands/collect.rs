use super::Host;
use super::common::CommonArgs;
use crate::Result;
use crate::metrics::derive_all;
use crate::sink::{InfluxWriter, SinkAdapter, StdoutWriter, TimeSeriesWriter, build_points};
use crate::snapshot::{Assembler, DocumentSource, HttpDocumentSource};
use clap::Parser;
use std::io::Write;

const LOG_TARGET: &str = "   collect";

#[derive(Parser, Debug)]
pub struct CollectArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Print line protocol to the terminal instead of writing to InfluxDB
    #[arg(long)]
    pub dry_run: bool,
}

/// Run one collection cycle: snapshot, derive, build points, write.
///
/// The writer is owned by the sink for the whole cycle and is always closed before this
/// returns. Every point is built before the first one is handed to the sink, so a cycle
/// that fails anywhere before the write phase writes nothing.
pub async fn run_cycle<S, W>(source: S, writer: W, outbox_capacity: usize) -> Result<usize>
where
    S: DocumentSource,
    W: TimeSeriesWriter,
{
    SinkAdapter::scoped(writer, outbox_capacity, async |sink| {
        let snapshot = Assembler::new(source).assemble().await?;
        let records = derive_all(&snapshot)?;
        let points = build_points(records)?;

        let count = points.len();
        sink.write_many(points).await?;
        Ok(count)
    })
    .await
}

pub async fn collect<H: Host>(host: &mut H, args: &CollectArgs) -> Result<()> {
    match collect_inner(args).await {
        Ok(count) => {
            log::info!(target: LOG_TARGET, "Cycle complete, {count} point(s) written");
            Ok(())
        }
        Err(e) => {
            let _ = writeln!(host.error(), "Collection cycle failed: {e:#}");
            host.exit(1);
            Err(e)
        }
    }
}

async fn collect_inner(args: &CollectArgs) -> Result<usize> {
    let config = args.common.resolve_config()?;
    if args.dry_run {
        config.validate_api()?;
    } else {
        config.validate()?;
    }

    let source = HttpDocumentSource::new(&config.api.base_url, &config.api.code, config.api.request_timeout)?;
    log::info!(target: LOG_TARGET, "Starting collection cycle against '{}'", config.api.base_url);

    if args.dry_run {
        run_cycle(source, StdoutWriter::new(), config.influx.outbox_capacity).await
    } else {
        let influx = &config.influx;
        let writer = InfluxWriter::new(&influx.url, &influx.token, &influx.org, &influx.bucket, config.api.request_timeout)?;
        run_cycle(source, writer, influx.outbox_capacity).await
    }
}
