//! Text and JSON renderings of an [`AnalysisResult`].

use crate::analysis::AnalysisResult;
use crate::drivers::ScopeError;

fn frequency_text(freq: Option<f32>) -> String {
    freq.map(|f| format!("{:.2} Hz", f))
        .unwrap_or_else(|| "unknown".to_string())
}

impl AnalysisResult {
    /// Format as text report
    pub fn to_text(&self) -> String {
        let mut output = String::new();
        output.push_str("Buffer Analysis\n");
        output.push_str(&"=".repeat(44));
        output.push('\n');
        output.push_str(&format!("Samples:           {}\n", self.sample_count));
        output.push_str(&format!("Sample Rate:       {:.3} kHz\n", self.sample_rate_khz));
        output.push_str(&format!("Duration:          {:.6} s\n", self.duration_seconds()));
        output.push_str(&format!("Reference:         {:.2} V\n", self.reference_voltage));

        output.push_str("\nLevels\n");
        output.push_str(&"-".repeat(44));
        output.push('\n');
        output.push_str(&format!(
            "Max:               {} ({:.3} V)\n",
            self.max,
            self.max_volts()
        ));
        output.push_str(&format!(
            "Min:               {} ({:.3} V)\n",
            self.min,
            self.min_volts()
        ));
        output.push_str(&format!("Midpoint:          {:.1} (raw)\n", self.midpoint()));
        output.push_str(&format!("Average:           {:.3} V\n", self.average));
        output.push_str(&format!("Range:             {:.3} V\n", self.range));
        output.push_str(&format!("RMS:               {:.3} V\n", self.rms));
        output.push_str(&format!("Std Deviation:     {:.3} (raw)\n", self.stddev));

        output.push_str("\nFrequency\n");
        output.push_str(&"-".repeat(44));
        output.push('\n');
        output.push_str(&format!(
            "Autocorrelation:   {}\n",
            frequency_text(self.freq_autocorr)
        ));
        output.push_str(&format!(
            "Mid transitions:   {}\n",
            frequency_text(self.freq_transition)
        ));
        output
    }

    /// Format as JSON. Unknown frequencies are `null`.
    pub fn to_json(&self) -> Result<String, ScopeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
