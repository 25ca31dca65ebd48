//! CSV and JSON exports.

use std::io::Write;

use hs_load::{LoadResult, hourly_load};
use serde::Serialize;

use crate::error::AppResult;

/// Write the 8760-hour load series as CSV. Returns the number of rows.
pub fn write_hourly_csv<W: Write>(result: &LoadResult, mut out: W) -> AppResult<usize> {
    writeln!(out, "index,day,hour,t_out_c,load_w")?;
    let mut rows = 0;
    for h in hourly_load(result) {
        writeln!(
            out,
            "{},{},{},{:.3},{:.3}",
            h.index, h.day, h.hour, h.t_out_c, h.load_w
        )?;
        rows += 1;
    }
    out.flush()?;
    Ok(rows)
}

pub fn write_json<T: Serialize, W: Write>(value: &T, mut out: W) -> AppResult<()> {
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}
