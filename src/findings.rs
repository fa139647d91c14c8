use crate::catalog::ClassCatalog;
use crate::models::{BoundingBox, RawDetection};

/// A normalized, filter-surviving detection.
///
/// `local_index` is the finding's position in the current filtered list, not
/// in the raw detector output. It is the identity used for row selection and
/// stays stable until the image, filter or detection run changes, at which
/// point the whole list is rebuilt from scratch.
#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    pub local_index: usize,
    pub label: String,
    pub confidence: f32,
    pub bbox: BoundingBox,
}

/// Per-label occurrence counts over the current finding list, ordered by
/// descending count with ties broken alphabetically.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryCounts {
    entries: Vec<(String, usize)>,
}

impl SummaryCounts {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(label, n)| (label.as_str(), *n))
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    pub fn count(&self, label: &str) -> usize {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }
}

/// Turn raw detector output into the finding list for one image.
///
/// With no filter every detection becomes exactly one finding in detector
/// order. With a filter only detections whose resolved label equals it are
/// kept, still in the original relative order, re-indexed contiguously from
/// zero. An empty survivor set is a valid result. A class id outside the
/// catalog aborts the pass.
pub fn normalize_detections(
    raw: &[RawDetection],
    catalog: &ClassCatalog,
    filter: Option<&str>,
) -> anyhow::Result<Vec<Finding>> {
    let mut findings = Vec::new();
    for detection in raw {
        let label = catalog.resolve(detection.class_id)?;
        if let Some(wanted) = filter {
            if label != wanted {
                continue;
            }
        }
        findings.push(Finding {
            local_index: findings.len(),
            label: label.to_string(),
            confidence: detection.confidence,
            bbox: detection.bbox,
        });
    }
    Ok(findings)
}

/// Count label occurrences over a finding list. Pure: independent of any
/// selection state, and an empty list just yields empty counts.
pub fn summarize(findings: &[Finding]) -> SummaryCounts {
    let mut entries: Vec<(String, usize)> = Vec::new();
    for finding in findings {
        match entries.iter_mut().find(|(label, _)| *label == finding.label) {
            Some((_, n)) => *n += 1,
            None => entries.push((finding.label.clone(), 1)),
        }
    }
    entries.sort_by(|(la, na), (lb, nb)| nb.cmp(na).then_with(|| la.cmp(lb)));
    SummaryCounts { entries }
}
