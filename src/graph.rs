//! Row-per-sample text graph of a sample buffer, sized for an 80-column
//! serial terminal.
//!
//! Each row starts with the raw value right-aligned in three columns, then a
//! `*` placed one column per four raw units. Every twentieth row carries the
//! horizontal axis and the row index. In voltage mode the axis is labelled in
//! volts and each row ends with the sample's voltage at column 80.

use std::io::Write;

use crate::analysis::FULL_SCALE;
use crate::drivers::{SampleFrame, ScopeError};
use crate::format::{fixed, pad};

const RAW_AXIS: &str = "0+++++++++++++++64++++++++++++++128+++++++++++++192+++++++++++++255";
const AXIS_INTERVAL: usize = 20;
const VALUE_COLUMNS: usize = 4;
const UNITS_PER_COLUMN: usize = 4;
const VOLTAGE_COLUMN: usize = 80;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GraphScale {
    /// Axis labelled 0-255.
    Raw,
    /// Axis labelled in volts for the given reference.
    Volts(f32),
}

impl GraphScale {
    /// Zero or negative references select the raw scale.
    pub fn from_reference(reference_voltage: f32) -> Self {
        if reference_voltage > 0.0 {
            GraphScale::Volts(reference_voltage)
        } else {
            GraphScale::Raw
        }
    }

    fn axis(&self) -> String {
        match *self {
            GraphScale::Raw => RAW_AXIS.to_string(),
            GraphScale::Volts(reference) => {
                let tick = "+".repeat(12);
                format!(
                    "0+++{tick}{}{tick}{}{tick}{}{tick}{}V ",
                    fixed(reference / 4.0),
                    fixed(reference / 2.0),
                    fixed(reference * 0.75),
                    fixed(reference)
                )
            }
        }
    }
}

fn marker_offset(value: u8) -> usize {
    (value as usize).div_ceil(UNITS_PER_COLUMN)
}

/// Renders `samples`; a `reference_voltage` of zero selects the raw scale.
pub fn render(samples: &[u8], reference_voltage: f32) -> Vec<String> {
    render_scaled(samples, GraphScale::from_reference(reference_voltage))
}

pub fn render_scaled(samples: &[u8], scale: GraphScale) -> Vec<String> {
    let axis = scale.axis();
    let mut lines = Vec::with_capacity(samples.len() + 1);
    for (index, &value) in samples.iter().enumerate() {
        let mut row = pad(value as u64, VALUE_COLUMNS - 1, " ");
        row.push(' ');
        let offset = marker_offset(value);
        if index % AXIS_INTERVAL == 0 {
            row.push_str(&axis);
            row.push_str(&format!("({index})"));
            let column = VALUE_COLUMNS + offset;
            if column < row.len() {
                row.replace_range(column..column + 1, "*");
            }
        } else {
            row.push_str(&" ".repeat(offset));
            row.push('*');
        }
        if let GraphScale::Volts(reference) = scale {
            let fill = VOLTAGE_COLUMN.saturating_sub(row.len());
            row.push_str(&" ".repeat(fill));
            row.push_str(&fixed(value as f32 * reference / FULL_SCALE));
        }
        lines.push(row);
    }
    if let Some(last) = samples.len().checked_sub(1) {
        if last % AXIS_INTERVAL > 0 {
            let gap = match scale {
                GraphScale::Raw => " ",
                GraphScale::Volts(_) => "",
            };
            lines.push(format!("    {axis}{gap}({last})"));
        }
    }
    lines
}

/// Writes the graph to a serial-style stream, framed by a header and a
/// trailing blank line.
pub fn write_graph<W: Write>(
    out: &mut W,
    samples: &[u8],
    reference_voltage: f32,
) -> Result<(), ScopeError> {
    writeln!(out)?;
    writeln!(out, "Data display:")?;
    writeln!(out)?;
    for line in render(samples, reference_voltage) {
        writeln!(out, "{line}")?;
    }
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

/// Convenience wrapper for a captured frame.
pub fn write_frame<W: Write>(
    out: &mut W,
    frame: &SampleFrame,
    scale: GraphScale,
) -> Result<(), ScopeError> {
    let reference = match scale {
        GraphScale::Raw => 0.0,
        GraphScale::Volts(reference) => reference,
    };
    write_graph(out, &frame.samples, reference)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_axis_row_places_marker_over_axis() {
        let lines = render(&[0, 8], 0.0);
        assert_eq!(lines[0], format!("  0 *{}(0)", &RAW_AXIS[1..]));
        assert_eq!(lines[1], "  8   *");
    }

    #[test]
    fn full_scale_marker_lands_on_axis_label() {
        let lines = render(&[255], 0.0);
        let row = lines[0].as_bytes();
        assert_eq!(row[VALUE_COLUMNS + 64], b'*');
        assert!(lines[0].ends_with("5(0)"));
    }

    #[test]
    fn axis_repeats_every_twenty_rows() {
        let samples = vec![100u8; 45];
        let lines = render(&samples, 0.0);
        assert_eq!(lines.len(), 46);
        for (index, line) in lines.iter().take(45).enumerate() {
            assert_eq!(line.contains(&format!("({index})")), index % 20 == 0);
        }
        assert_eq!(lines[45], format!("    {RAW_AXIS} (44)"));
    }

    #[test]
    fn no_closing_axis_when_last_row_has_one() {
        let lines = render(&[10u8; 21], 0.0);
        assert_eq!(lines.len(), 21);
        assert!(lines[20].ends_with("(20)"));
        assert_eq!(render(&[10u8], 0.0).len(), 1);
        assert!(render(&[], 0.0).is_empty());
    }

    #[test]
    fn voltage_mode_labels_axis_and_rows() {
        let lines = render(&[0, 255, 51], 5.0);
        assert!(lines[0].starts_with("  0 *"));
        assert!(lines[0].contains("+++1.25++++++++++++2.50++++++++++++3.75++++++++++++5.00V (0)"));
        assert!(lines[0].ends_with("0.00"));
        assert_eq!(lines[1].len(), VOLTAGE_COLUMN + 4);
        assert!(lines[1].ends_with("5.00"));
        assert!(lines[2].ends_with("1.00"));
        assert!(lines[3].starts_with("    0+++"));
        assert!(lines[3].ends_with("5.00V (2)"));
    }

    #[test]
    fn scale_from_reference() {
        assert_eq!(GraphScale::from_reference(0.0), GraphScale::Raw);
        assert_eq!(GraphScale::from_reference(-1.0), GraphScale::Raw);
        assert_eq!(GraphScale::from_reference(3.3), GraphScale::Volts(3.3));
    }

    #[test]
    fn write_graph_frames_output() {
        let mut out = Vec::new();
        write_graph(&mut out, &[4, 4], 0.0).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("\nData display:\n\n  4 "));
        assert!(text.ends_with("(1)\n\n"));
    }
}
