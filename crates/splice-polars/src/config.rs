//! Column layouts of the tables this crate reads

/// Columns of the splice group reference table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupColumns {
    pub group_id: String,
    pub primary: String,
    pub secondary: String,
}

impl Default for GroupColumns {
    fn default() -> Self {
        Self {
            group_id: "group_id".to_string(),
            primary: "station_primary_id".to_string(),
            secondary: "station_secondary_id".to_string(),
        }
    }
}

/// Columns of the daily observation table
///
/// An empty `fields` list selects every numeric column other than the
/// station and date columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservationColumns {
    pub primary: String,
    pub secondary: String,
    pub date: String,
    pub fields: Vec<String>,
}

impl Default for ObservationColumns {
    fn default() -> Self {
        Self {
            primary: "station_primary_id".to_string(),
            secondary: "station_secondary_id".to_string(),
            date: "date".to_string(),
            fields: Vec::new(),
        }
    }
}

impl ObservationColumns {
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub(crate) fn is_key(&self, name: &str) -> bool {
        name == self.primary || name == self.secondary || name == self.date
    }
}
