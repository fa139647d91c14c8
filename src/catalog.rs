/// Class names of the dental panoramic model, in training order.
/// Class ids are positional references into this list, so the order must
/// never change at runtime.
pub const DENTAL_CLASSES: [&str; 14] = [
    "tratamiento_conducto",
    "fractura",
    "diastema",
    "cordal",
    "quiste",
    "diente_retenido",
    "caries",
    "zona_dentula",
    "dientes_sanos",
    "apinamiento",
    "diente_rotado",
    "supernumerario",
    "enanismo_radicular",
    "residuo_radicular",
];

/// Fixed, ordered mapping from class id to class name, shared between the
/// normalizer and the filter control for the lifetime of a session.
#[derive(Debug, Clone)]
pub struct ClassCatalog {
    names: Vec<String>,
}

impl ClassCatalog {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// The catalog matching the pretrained dental model.
    pub fn dental() -> Self {
        Self::new(DENTAL_CLASSES)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Resolve a detector class id to its name. An out-of-range id means the
    /// detector and the catalog disagree, which would silently mislabel every
    /// downstream finding, so it fails instead.
    pub fn resolve(&self, class_id: u32) -> anyhow::Result<&str> {
        self.names
            .get(class_id as usize)
            .map(String::as_str)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "class id {} out of range for catalog of {} classes (detector/catalog mismatch)",
                    class_id,
                    self.names.len()
                )
            })
    }
}
