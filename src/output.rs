//! Text rendering of holdings and streams.
//!
//! TSV by default, one JSON object per line with `--json`.

use std::io::Write;

use flowsdk::projection::StreamRow;
use flowsdk::utils::format_utc;
use flowsdk::TokenHolding;
use serde::Serialize;

use crate::error::AppError;

pub const STREAM_HEADER: &str =
    "STATUS\tNAME\tSTREAM ID\tSENDER\tRECIPIENT\tWITHDRAWN / DEPOSITED\tPROGRESS\tSTART (UTC)\tEND (UTC)";
pub const HOLDING_HEADER: &str = "SYMBOL\tAMOUNT\tMINT";

pub const NO_WALLET: &str = "connect wallet to use streamflow";
pub const WALLET_UNAVAILABLE: &str = "wallet is not available";
pub const NO_CURRENCY: &str = "You must have currency in your wallet to create a stream";
pub const LOAD_FAILED: &str = "Error! Please reload the page";

/// Format a display amount to the token's `decimals`, without trailing zeros.
fn format_amount(value: f64, decimals: u32) -> String {
    let s = format!("{value:.prec$}", prec = decimals as usize);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() || s == "-" {
        "0".into()
    } else {
        s.to_string()
    }
}

/// One TSV line for a stream.
pub fn stream_line(row: &StreamRow) -> String {
    let p = &row.projection;
    let r = &row.record;
    let mut amounts = format!(
        "{} / {}",
        format_amount(p.withdrawn_display, p.decimals),
        format_amount(p.deposited_display, p.decimals)
    );
    if !p.symbol.is_empty() {
        amounts.push(' ');
        amounts.push_str(&p.symbol);
    }
    format!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{:.0}%\t{}\t{}",
        p.status,
        r.name,
        row.id,
        r.sender,
        r.recipient,
        amounts,
        p.progress_percent(),
        format_utc(r.start),
        format_utc(r.end),
    )
}

/// One TSV line for a holding.
pub fn holding_line(holding: &TokenHolding) -> String {
    format!(
        "{}\t{}\t{}",
        holding.symbol(),
        holding.ui_amount.normalize(),
        holding.mint
    )
}

fn write_json_lines<W: Write, T: Serialize>(items: &[T], writer: &mut W) -> Result<(), AppError> {
    for item in items {
        serde_json::to_writer(&mut *writer, item)?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}

pub fn render_streams<W: Write>(
    rows: &[StreamRow],
    json_mode: bool,
    writer: &mut W,
) -> Result<(), AppError> {
    if json_mode {
        write_json_lines(rows, writer)?;
    } else {
        writeln!(writer, "{STREAM_HEADER}")?;
        for row in rows {
            writeln!(writer, "{}", stream_line(row))?;
        }
    }
    writer.flush()?;
    Ok(())
}

pub fn render_holdings<W: Write>(
    holdings: &[TokenHolding],
    json_mode: bool,
    writer: &mut W,
) -> Result<(), AppError> {
    if json_mode {
        write_json_lines(holdings, writer)?;
    } else if holdings.is_empty() {
        writeln!(writer, "{NO_CURRENCY}")?;
    } else {
        writeln!(writer, "{HOLDING_HEADER}")?;
        for holding in holdings {
            writeln!(writer, "{}", holding_line(holding))?;
        }
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowsdk::{project_all, StreamFlags, StreamRecord, TokenDirectory};
    use rust_decimal_macros::dec;

    fn rows() -> Vec<StreamRow> {
        let record = StreamRecord {
            sender: "alice".into(),
            recipient: "bob".into(),
            mint: "Gssm3vfi8s65R31SBdmQRq6cKeYojGgup7whkw4VCiQj".into(),
            name: "payroll".into(),
            start: 0,
            end: 86_400,
            cliff: 0,
            deposited_amount: 10_000_000_000,
            withdrawn_amount: 2_500_000_000,
            canceled_at: 0,
            flags: StreamFlags::default(),
        };
        project_all(
            vec![("id1".into(), record)],
            3_600,
            &TokenDirectory::static_only(),
        )
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(10.0, 9), "10");
        assert_eq!(format_amount(2.5, 9), "2.5");
        assert_eq!(format_amount(0.0, 9), "0");
        assert_eq!(format_amount(0.000000001, 9), "0.000000001");
        assert_eq!(format_amount(42.0, 0), "42");
    }

    #[test]
    fn test_format_amount_keeps_digits_beyond_nine_decimals() {
        assert_eq!(format_amount(0.000000000001, 12), "0.000000000001");
        assert_eq!(format_amount(1.5e-11, 12), "0.000000000015");
    }

    #[test]
    fn test_stream_line() {
        let line = stream_line(&rows()[0]);
        assert_eq!(
            line,
            "in progress\tpayroll\tid1\talice\tbob\t2.5 / 10 STRM\t25%\t\
             Thu, 01 Jan 1970 00:00:00 GMT\tFri, 02 Jan 1970 00:00:00 GMT"
        );
    }

    #[test]
    fn test_render_streams_tsv_has_header() {
        let mut out = Vec::new();
        render_streams(&rows(), false, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(STREAM_HEADER));
        assert!(lines.next().unwrap().starts_with("in progress\tpayroll"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_render_streams_json_lines() {
        let mut out = Vec::new();
        render_streams(&rows(), true, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let value: serde_json::Value = serde_json::from_str(text.trim()).unwrap();
        assert_eq!(value["id"], "id1");
        assert_eq!(value["projection"]["status"], "in_progress");
        assert_eq!(value["record"]["depositedAmount"], "10000000000");
    }

    #[test]
    fn test_render_empty_holdings() {
        let mut out = Vec::new();
        render_holdings(&[], false, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().trim(), NO_CURRENCY);
    }

    #[test]
    fn test_holding_line_unknown_token() {
        let holding = TokenHolding {
            mint: "mint".into(),
            owner: "owner".into(),
            ui_amount: dec!(1.500),
            amount: 1_500,
            decimals: 3,
            metadata: None,
        };
        assert_eq!(holding_line(&holding), "\t1.5\tmint");
    }
}
