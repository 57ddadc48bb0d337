//! Timeline Reconstruction
//!
//! Converts decoded entries into times relative to the first time-based
//! entry and pairs `NAME_END` tags with the closest preceding `NAME_BEGIN`.

use crate::classify::TagClass;
use crate::parse::{Timestamp, Unwrapper};
use crate::settings::DecoderConfig;
use microtags::Microtag;
use std::fmt;

const BEGIN_SUFFIX: &str = "_BEGIN";
const END_SUFFIX: &str = "_END";

/// What an entry's value means
#[derive(Debug, Clone, PartialEq)]
pub enum RowValue {
    /// Seconds since the first time-based entry
    Time { seconds: f64 },
    /// Raw data word
    Data { value: u32 },
    Reserved { value: u32 },
}

/// A `NAME_BEGIN` / `NAME_END` pair closed by this row
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub stem: String,
    pub begin: usize,
    pub seconds: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineRow {
    pub index: usize,
    pub tag: u16,
    pub name: Option<String>,
    pub class: TagClass,
    pub value: RowValue,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Timeline {
    pub rows: Vec<TimelineRow>,
}

/// Entry before timing is applied; `counter` is set for time-based tags
struct RawEntry {
    tag: u16,
    class: TagClass,
    counter: u64,
    value: u32,
}

impl Timeline {
    /// Build from microtags; time-based counters wrap at 2^32
    pub fn from_microtags(tags: &[Microtag], config: &DecoderConfig) -> Self {
        let mut unwrap = Unwrapper::new(1 << 32);
        let entries = tags.iter().map(|tag| {
            let class = TagClass::of(tag.id);
            let counter = if class.is_time_based() {
                unwrap.next(u64::from(tag.data))
            } else {
                0
            };
            RawEntry {
                tag: tag.id,
                class,
                counter,
                value: tag.data,
            }
        });
        Self::build(entries, config)
    }

    /// Build from hex timestamps, whose counters are already unwrapped
    pub fn from_timestamps(stamps: &[Timestamp], config: &DecoderConfig) -> Self {
        let entries = stamps.iter().map(|stamp| {
            let tag = u16::from(stamp.tag);
            RawEntry {
                tag,
                class: TagClass::of(tag),
                counter: stamp.counter,
                value: stamp.counter as u32,
            }
        });
        Self::build(entries, config)
    }

    fn build(entries: impl Iterator<Item = RawEntry>, config: &DecoderConfig) -> Self {
        let mut rows: Vec<TimelineRow> = Vec::new();
        // Absolute times, kept for span arithmetic
        let mut absolute: Vec<Option<f64>> = Vec::new();
        let mut origin = None;

        for (index, entry) in entries.enumerate() {
            let name = config.name_of(entry.tag).map(str::to_string);
            let (value, time) = match entry.class {
                TagClass::Data => (RowValue::Data { value: entry.value }, None),
                TagClass::Reserved => (RowValue::Reserved { value: entry.value }, None),
                _ => {
                    let time = entry.counter as f64 * config.tick_seconds;
                    let origin = *origin.get_or_insert(time);
                    (RowValue::Time { seconds: time - origin }, Some(time))
                }
            };

            let span = match (&name, time) {
                (Some(name), Some(end)) => name
                    .strip_suffix(END_SUFFIX)
                    .and_then(|stem| find_begin(&rows, &absolute, stem, end)),
                _ => None,
            };

            absolute.push(time);
            rows.push(TimelineRow {
                index,
                tag: entry.tag,
                name,
                class: entry.class,
                value,
                span,
            });
        }
        Self { rows }
    }

    /// Closed spans in order of their end rows
    pub fn spans(&self) -> impl Iterator<Item = (&TimelineRow, &Span)> {
        self.rows
            .iter()
            .filter_map(|row| row.span.as_ref().map(|span| (row, span)))
    }
}

fn find_begin(
    rows: &[TimelineRow],
    absolute: &[Option<f64>],
    stem: &str,
    end: f64,
) -> Option<Span> {
    rows.iter().zip(absolute).rev().find_map(|(row, time)| {
        let begin = row.name.as_deref()?.strip_suffix(BEGIN_SUFFIX)?;
        if begin != stem {
            return None;
        }
        Some(Span {
            stem: stem.to_string(),
            begin: row.index,
            seconds: end - (*time)?,
        })
    })
}

impl fmt::Display for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .rows
            .iter()
            .filter_map(|row| row.span.as_ref().map(|span| span.stem.len()))
            .max()
            .unwrap_or(0);

        for row in &self.rows {
            let name = row.name.as_deref().unwrap_or("UNKNOWN");
            let label = format!("{} (0x{:04X})", name, row.tag);
            match &row.value {
                RowValue::Time { seconds } => {
                    write!(f, "{:3}: {:>10.2} ms: {:40}", row.index, seconds * 1e3, label)?;
                }
                RowValue::Data { value } => {
                    write!(
                        f,
                        "{:3}: {:>10}   : {:40} = 0x{:08X}",
                        row.index, "data", label, value
                    )?;
                }
                RowValue::Reserved { value } => {
                    write!(
                        f,
                        "{:3}: {:>10}   : {:40} = 0x{:08X}",
                        row.index, "reserved", label, value
                    )?;
                }
            }
            if let Some(span) = &row.span {
                write!(
                    f,
                    " [{:3}]---({:^width$})--->[{:3}] {:>8.2} ms",
                    span.begin,
                    span.stem,
                    row.index,
                    span.seconds * 1e3,
                    width = width
                )?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::TagName;

    fn config() -> DecoderConfig {
        DecoderConfig {
            tick_seconds: 1e-3,
            tags: vec![
                TagName {
                    name: "ADC_BEGIN".to_string(),
                    id: 0x0010,
                },
                TagName {
                    name: "ADC_END".to_string(),
                    id: 0x4010,
                },
                TagName {
                    name: "VOLTAGE".to_string(),
                    id: 0xC001,
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_times_relative_to_first_time_based_entry() {
        let tags = [
            Microtag::new(0xC001, 3300),
            Microtag::new(0x0010, 1000),
            Microtag::new(0x8000, 1250),
        ];
        let timeline = Timeline::from_microtags(&tags, &config());

        assert_eq!(timeline.rows[0].value, RowValue::Data { value: 3300 });
        assert_eq!(timeline.rows[0].name.as_deref(), Some("VOLTAGE"));
        assert_eq!(timeline.rows[1].value, RowValue::Time { seconds: 0.0 });
        match timeline.rows[2].value {
            RowValue::Time { seconds } => assert!((seconds - 0.25).abs() < 1e-9),
            ref other => panic!("unexpected value {other:?}"),
        }
        assert_eq!(timeline.rows[2].class, TagClass::Single);
    }

    #[test]
    fn test_end_pairs_with_nearest_begin() {
        let tags = [
            Microtag::new(0x0010, 100),
            Microtag::new(0x0010, 200),
            Microtag::new(0x4010, 260),
            Microtag::new(0x4010, 300),
        ];
        let timeline = Timeline::from_microtags(&tags, &config());
        let spans: Vec<(usize, usize)> = timeline
            .spans()
            .map(|(row, span)| (span.begin, row.index))
            .collect();
        assert_eq!(spans, vec![(1, 2), (1, 3)]);

        let span = timeline.rows[2].span.as_ref().unwrap();
        assert_eq!(span.stem, "ADC");
        assert!((span.seconds - 0.060).abs() < 1e-9);
    }

    #[test]
    fn test_end_without_begin_has_no_span() {
        let tags = [Microtag::new(0x4010, 5)];
        let timeline = Timeline::from_microtags(&tags, &config());
        assert!(timeline.rows[0].span.is_none());
    }

    #[test]
    fn test_microtag_counter_wrap() {
        let tags = [Microtag::new(0x8000, u32::MAX), Microtag::new(0x8000, 0)];
        let timeline = Timeline::from_microtags(&tags, &DecoderConfig {
            tick_seconds: 1.0,
            ..Default::default()
        });
        assert_eq!(timeline.rows[1].value, RowValue::Time { seconds: 1.0 });
    }

    #[test]
    fn test_from_timestamps_and_render() {
        let stamps = [
            Timestamp { tag: 0x10, counter: 10 },
            Timestamp { tag: 0x11, counter: 15 },
        ];
        let timeline = Timeline::from_timestamps(&stamps, &config());
        match timeline.rows[1].value {
            RowValue::Time { seconds } => assert!((seconds - 5e-3).abs() < 1e-9),
            ref other => panic!("unexpected value {other:?}"),
        }

        let text = timeline.to_string();
        assert_eq!(text.lines().count(), 2);
        assert!(text.lines().next().unwrap().contains("ADC_BEGIN (0x0010)"));
        assert!(text.contains("UNKNOWN (0x0011)"));
    }

    #[test]
    fn test_render_value_rows() {
        let tags = [Microtag::new(0xC001, 0x1234), Microtag::new(0xF002, 7)];
        let text = Timeline::from_microtags(&tags, &config()).to_string();
        let mut lines = text.lines();

        let data = lines.next().unwrap();
        assert!(data.contains("data"));
        assert!(data.contains("VOLTAGE (0xC001)"));
        assert!(data.ends_with("= 0x00001234"));

        let reserved = lines.next().unwrap();
        assert!(reserved.contains("reserved"));
        assert!(reserved.ends_with("= 0x00000007"));
    }
}
