//! Pick the best decode of a name record.

use crate::{
    charset::{Charset, Decoded},
    heuristics::{candidates_for_record, Candidate, Source},
    record::NameRecord,
};

/// How much a decoded name can be trusted, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display)]
pub enum IssueLevel {
    /// Decoded cleanly with the declared charset.
    Clean,
    /// Decoded cleanly, but the declared charset does not match the data.
    Mark,
    /// String data is damaged, the name is a partial recovery.
    Data,
    /// Nothing decodes the data.
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeResult {
    pub text: String,
    pub issue: IssueLevel,
    /// Charset actually used, `None` if it is the declared one or decoding
    /// failed.
    pub encoding: Option<Charset>,
}

impl DecodeResult {
    fn fail() -> Self {
        Self {
            text: String::new(),
            issue: IssueLevel::Fail,
            encoding: None,
        }
    }
}

/// A decode that is not clean is still usable if at most one in five chars
/// is anomalous (replacement, control or noncharacter).
const MAX_ANOMALY_DIVISOR: usize = 5;

fn legible(decoded: &Decoded) -> bool {
    let total = decoded.text.chars().count();
    total > 0 && decoded.anomalies() * MAX_ANOMALY_DIVISOR <= total
}

/// Issue level of a clean decode by `source`, `None` if the source is not
/// trusted even when clean.
fn clean_issue(source: Source) -> Option<IssueLevel> {
    match source {
        Source::Declared => Some(IssueLevel::Clean),
        Source::Language | Source::Signature | Source::Fallback => Some(IssueLevel::Mark),
        Source::Repair => Some(IssueLevel::Data),
        Source::LastResort => None,
    }
}

/// Try `candidates` in order, the first clean decode wins. Otherwise the
/// first legible one is taken as damaged data.
pub fn score(raw: &[u8], candidates: &[Candidate]) -> DecodeResult {
    if raw.is_empty() {
        return DecodeResult::fail();
    }

    let mut attempts = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let decoded = candidate.decode(raw);
        log::trace!(
            "{} {:?} ({}): {:?}, clean: {}",
            candidate.charset,
            candidate.framing,
            candidate.source,
            decoded.text,
            decoded.clean
        );
        if decoded.clean {
            if let Some(issue) = clean_issue(candidate.source) {
                return DecodeResult {
                    encoding: (issue != IssueLevel::Clean).then_some(candidate.charset),
                    text: decoded.text,
                    issue,
                };
            }
        }
        attempts.push((candidate, decoded));
    }

    attempts
        .into_iter()
        .find(|(_, decoded)| legible(decoded))
        .map(|(candidate, decoded)| DecodeResult {
            text: decoded.stripped(),
            issue: IssueLevel::Data,
            encoding: Some(candidate.charset),
        })
        .unwrap_or_else(DecodeResult::fail)
}

/// Decode one name record.
pub fn decode_name(record: &NameRecord) -> DecodeResult {
    let r = score(record.raw, &candidates_for_record(record));
    match r.issue {
        IssueLevel::Clean => {}
        IssueLevel::Mark | IssueLevel::Data => log::debug!(
            "name record {}/{}/{}/{} decoded as {:?} with {}: {:?}",
            record.platform_id,
            record.encoding_id,
            record.language_id,
            record.name_id,
            r.issue,
            r.encoding.map_or("?", Charset::name),
            r.text
        ),
        IssueLevel::Fail => log::warn!(
            "name record {}/{}/{}/{} can not be decoded: {:02x?}",
            record.platform_id,
            record.encoding_id,
            record.language_id,
            record.name_id,
            record.raw
        ),
    }
    r
}

#[cfg(test)]
mod tests;
