//! Prometheus text exposition format (version 0.0.4).

use std::io::{self, Write};

use crate::metrics::registry::{MetricFamilySnapshot, Sample, SampleValue};

/// Content type declared by the text exposition format.
pub const TEXT_FORMAT: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Renders registry snapshots into the text wire format.
///
/// Encoding is a read-only pass over already-validated snapshots; a failure
/// here is a programming defect, not a runtime condition.
#[derive(Debug, Default)]
pub struct TextEncoder;

impl TextEncoder {
    pub fn new() -> Self {
        TextEncoder
    }

    /// Writes every family as `# HELP` / `# TYPE` header lines followed by
    /// one sample line per label-cell combination.
    pub fn encode(&self, families: &[MetricFamilySnapshot], buf: &mut Vec<u8>) -> io::Result<()> {
        for family in families {
            self.encode_family(family, buf)?;
        }
        Ok(())
    }

    fn encode_family(&self, family: &MetricFamilySnapshot, buf: &mut Vec<u8>) -> io::Result<()> {
        writeln!(buf, "# HELP {} {}", family.name, escape_help(&family.help))?;
        writeln!(buf, "# TYPE {} {}", family.name, family.kind.as_str())?;
        for sample in &family.samples {
            self.encode_sample(family, sample, buf)?;
        }
        Ok(())
    }

    fn encode_sample(
        &self,
        family: &MetricFamilySnapshot,
        sample: &Sample,
        buf: &mut Vec<u8>,
    ) -> io::Result<()> {
        let names = &family.label_names;
        let values = &sample.label_values;
        match &sample.value {
            SampleValue::Counter(v) | SampleValue::Gauge(v) => {
                write_sample(buf, &family.name, names, values, None, &format_value(*v))
            }
            SampleValue::Histogram(h) => {
                let bucket_name = format!("{}_bucket", family.name);
                for (bound, cumulative) in &h.buckets {
                    write_sample(
                        buf,
                        &bucket_name,
                        names,
                        values,
                        Some(("le", &format_value(*bound))),
                        &cumulative.to_string(),
                    )?;
                }
                // The +Inf bucket always equals the observation count.
                write_sample(
                    buf,
                    &bucket_name,
                    names,
                    values,
                    Some(("le", "+Inf")),
                    &h.count.to_string(),
                )?;
                write_sample(
                    buf,
                    &format!("{}_sum", family.name),
                    names,
                    values,
                    None,
                    &format_value(h.sum),
                )?;
                write_sample(
                    buf,
                    &format!("{}_count", family.name),
                    names,
                    values,
                    None,
                    &h.count.to_string(),
                )
            }
        }
    }
}

fn write_sample(
    buf: &mut Vec<u8>,
    name: &str,
    label_names: &[String],
    label_values: &[String],
    extra: Option<(&str, &str)>,
    value: &str,
) -> io::Result<()> {
    write!(buf, "{}", name)?;
    if !label_names.is_empty() || extra.is_some() {
        write!(buf, "{{")?;
        let mut first = true;
        for (label, label_value) in label_names.iter().zip(label_values.iter()) {
            if !first {
                write!(buf, ",")?;
            }
            write!(buf, "{}=\"{}\"", label, escape_label_value(label_value))?;
            first = false;
        }
        if let Some((label, label_value)) = extra {
            if !first {
                write!(buf, ",")?;
            }
            write!(buf, "{}=\"{}\"", label, escape_label_value(label_value))?;
        }
        write!(buf, "}}")?;
    }
    writeln!(buf, " {}", value)
}

/// Integral values render without a decimal point; non-finite values use the
/// format's spellings.
fn format_value(value: f64) -> String {
    if value == f64::INFINITY {
        "+Inf".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else if value.is_nan() {
        "NaN".to_string()
    } else if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

fn escape_label_value(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

fn escape_help(help: &str) -> String {
    help.replace('\\', "\\\\").replace('\n', "\\n")
}
