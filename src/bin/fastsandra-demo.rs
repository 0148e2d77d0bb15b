//! Decode synthetic `time_series` pages the way a driver would hand them over.
//!
//! Each business day between `--start` and `--end` becomes one page holding
//! every instrument's bars from 08:00 to 17:00 at `--frequency-minutes`. The
//! page is encoded to wire layout, decoded into Arrow columns and summarised.

use std::time::Instant;

use anyhow::Context;
use arrow::{
    record_batch::RecordBatch,
    util::display::{ArrayFormatter, FormatOptions},
};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use clap::Parser;
use comfy_table::Table;
use fastsandra::{
    wire, ColumnBuffer, DecodeOptions, PageColumn, RowSetAssembler, TypeRegistry, TypeTag,
};
use tracing_subscriber::EnvFilter;

const MILLIS_PER_MINUTE: i64 = 60_000;

#[derive(Parser, Debug)]
#[command(author, version, about = "Columnar decoding demo over a synthetic time series")]
struct Args {
    /// First calendar day to generate.
    #[arg(long, default_value = "2019-10-01")]
    start: NaiveDate,
    /// Last calendar day to generate, inclusive.
    #[arg(long, default_value = "2019-10-30")]
    end: NaiveDate,
    /// Instruments per day; ids run from 1 to this value minus one.
    #[arg(long, default_value = "1000")]
    instruments: i32,
    /// Minutes between consecutive bars.
    #[arg(long, default_value = "15")]
    frequency_minutes: i64,
    /// Rows of the first page to print.
    #[arg(long, default_value = "10")]
    show: usize,
    /// Decode the columns of each page in parallel.
    #[arg(long)]
    parallel: bool,
    /// Seed for the generated values.
    #[arg(long, default_value = "42")]
    seed: u64,
}

/// Columns of one day, kept as native vectors until encoded.
struct DayPage {
    event_date: Vec<i32>,
    instrument_id: Vec<i32>,
    event_timestamp: Vec<i64>,
    value: Vec<f64>,
}

fn business_days(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| !matches!(day.weekday(), Weekday::Sat | Weekday::Sun))
        .collect()
}

fn generate_day(day: NaiveDate, args: &Args, rng: &mut fastrand::Rng) -> anyhow::Result<DayPage> {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).context("unix epoch")?;
    let days = i32::try_from((day - epoch).num_days()).context("date out of range")?;
    let open = day
        .and_hms_opt(8, 0, 0)
        .context("market open")?
        .and_utc()
        .timestamp_millis();
    let close = open + Duration::hours(9).num_milliseconds();
    let step = args.frequency_minutes * MILLIS_PER_MINUTE;
    anyhow::ensure!(step > 0, "frequency must be positive");

    let bars = (open..=close).step_by(step as usize).collect::<Vec<_>>();
    let rows = bars.len() * args.instruments.saturating_sub(1).max(0) as usize;
    let mut page = DayPage {
        event_date: Vec::with_capacity(rows),
        instrument_id: Vec::with_capacity(rows),
        event_timestamp: Vec::with_capacity(rows),
        value: Vec::with_capacity(rows),
    };
    for instrument in 1..args.instruments {
        for &ts in &bars {
            page.event_date.push(days);
            page.instrument_id.push(instrument);
            page.event_timestamp.push(ts);
            page.value.push(rng.f64());
        }
    }
    Ok(page)
}

fn print_rows(batch: &RecordBatch, show: usize) -> anyhow::Result<()> {
    let options = FormatOptions::default();
    let formatters = batch
        .columns()
        .iter()
        .map(|column| ArrayFormatter::try_new(column.as_ref(), &options))
        .collect::<Result<Vec<_>, _>>()?;

    let mut table = Table::new();
    table.set_header(batch.schema().fields().iter().map(|f| f.name().clone()));
    for row in 0..batch.num_rows().min(show) {
        table.add_row(
            formatters
                .iter()
                .map(|formatter| formatter.value(row).to_string()),
        );
    }
    println!("{table}");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let args = Args::parse();

    let registry = TypeRegistry::with_temporal();
    let assembler = RowSetAssembler::with_options(
        &registry,
        DecodeOptions::default().parallel(args.parallel),
    );
    let mut rng = fastrand::Rng::with_seed(args.seed);

    let mut total_rows = 0usize;
    let mut decode_time = std::time::Duration::ZERO;
    for (index, day) in business_days(args.start, args.end).into_iter().enumerate() {
        let page = generate_day(day, &args, &mut rng)?;
        let row_count = page.instrument_id.len();

        let event_date = wire::encode_dates(&page.event_date);
        let instrument_id = wire::encode_column(&page.instrument_id);
        let event_timestamp = wire::encode_timestamps(&page.event_timestamp);
        let value = wire::encode_column(&page.value);
        let columns = [
            PageColumn::new("event_date", TypeTag::DATE, ColumnBuffer::new(&event_date)),
            PageColumn::new(
                "instrument_id",
                TypeTag::INT,
                ColumnBuffer::new(&instrument_id),
            ),
            PageColumn::new(
                "event_timestamp",
                TypeTag::TIMESTAMP,
                ColumnBuffer::new(&event_timestamp),
            ),
            PageColumn::new("value", TypeTag::DOUBLE, ColumnBuffer::new(&value)),
        ];

        let started = Instant::now();
        let rows = assembler.assemble(&columns, row_count)?;
        decode_time += started.elapsed();
        total_rows += rows.row_count();

        if index == 0 {
            print_rows(&rows.to_record_batch()?, args.show)?;
        }
    }

    println!(
        "decoded {total_rows} rows in {:.3} ms",
        decode_time.as_secs_f64() * 1_000.0
    );
    Ok(())
}
