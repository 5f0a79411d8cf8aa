//! Column aliasing shared by the CSV and JSON readers.

/// A company field recognized in source headers or object keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Country,
    Lei,
    Source,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Country, Field::Lei, Field::Source];

    /// Accepted header spellings, compared case-insensitively.
    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Name => &["name", "company", "company_name", "legal_name", "entity_name"],
            Self::Country => &["country", "country_code", "iso2", "jurisdiction"],
            Self::Lei => &["lei", "lei_code"],
            Self::Source => &["source", "provenance"],
        }
    }

    /// Canonical column name, used in error messages.
    pub const fn canonical(self) -> &'static str {
        self.aliases()[0]
    }

    /// Field for a header or key, ignoring case, surrounding whitespace and a BOM.
    pub fn from_header(header: &str) -> Option<Self> {
        let cleaned = header.trim_matches('\u{feff}').trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|field| field.aliases().contains(&cleaned.as_str()))
    }
}

/// Column positions of the recognized fields in a CSV header row.
///
/// The first matching column wins when several alias the same field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub name: usize,
    pub country: usize,
    pub lei: Option<usize>,
    pub source: Option<usize>,
}

impl ColumnMap {
    /// Map headers to fields. Errors with the first required field missing.
    pub fn from_headers<'a>(
        headers: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, Field> {
        let mut name = None;
        let mut country = None;
        let mut lei = None;
        let mut source = None;
        for (idx, header) in headers.into_iter().enumerate() {
            let slot = match Field::from_header(header) {
                Some(Field::Name) => &mut name,
                Some(Field::Country) => &mut country,
                Some(Field::Lei) => &mut lei,
                Some(Field::Source) => &mut source,
                None => continue,
            };
            if slot.is_none() {
                *slot = Some(idx);
            }
        }
        Ok(Self {
            name: name.ok_or(Field::Name)?,
            country: country.ok_or(Field::Country)?,
            lei,
            source,
        })
    }
}
