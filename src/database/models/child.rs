use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Allergy, Need};

/// A child enrolled in the program.
///
/// `needs` and `allergies` are copies of the linked rows, not references; they
/// are filled from the junction tables on every read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(default)]
pub struct Child {
    pub id: String,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub gender: String,
    pub photo_url: Option<String>,
    pub group_id: Option<String>,
    #[sqlx(skip)]
    pub needs: Vec<Need>,
    #[sqlx(skip)]
    pub allergies: Vec<Allergy>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of `PUT /api/v1/children/:id`.
///
/// A `None` association list leaves the stored links as they are; `Some`
/// (even empty) replaces them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateChildRequest {
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub gender: String,
    pub photo_url: Option<String>,
    pub group_id: Option<String>,
    pub needs: Option<Vec<Need>>,
    pub allergies: Option<Vec<Allergy>>,
}

impl UpdateChildRequest {
    /// Split into the child to store and which association sets to reconcile
    pub fn into_child(self, id: String) -> (Child, AssociationSync) {
        let sync = AssociationSync {
            needs: self.needs.is_some(),
            allergies: self.allergies.is_some(),
        };
        let child = Child {
            id,
            name: self.name,
            birth_date: self.birth_date,
            gender: self.gender,
            photo_url: self.photo_url,
            group_id: self.group_id,
            needs: self.needs.unwrap_or_default(),
            allergies: self.allergies.unwrap_or_default(),
            created_at: None,
            updated_at: None,
        };
        (child, sync)
    }
}

/// Which association sets an update should reconcile against the child's lists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssociationSync {
    pub needs: bool,
    pub allergies: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_inline_needs_without_ids() {
        let child: Child = serde_json::from_value(json!({
            "name": "Ana",
            "birth_date": "2015-03-01",
            "gender": "F",
            "needs": [{"type": "diet", "description": "gluten-free"}]
        }))
        .unwrap();

        assert_eq!(child.birth_date, NaiveDate::from_ymd_opt(2015, 3, 1));
        assert_eq!(child.needs.len(), 1);
        assert!(!child.needs[0].is_identified());
        assert_eq!(child.needs[0].kind, "diet");
        assert!(child.allergies.is_empty());
    }

    #[test]
    fn encodes_type_field_name() {
        let value = serde_json::to_value(Need::new("diet", "gluten-free")).unwrap();
        assert_eq!(value["type"], "diet");
        assert!(value.get("kind").is_none());
    }

    #[test]
    fn update_request_tracks_which_lists_were_sent() {
        let req: UpdateChildRequest = serde_json::from_value(json!({
            "name": "Ana",
            "birth_date": "2015-03-01",
            "gender": "F",
            "allergies": []
        }))
        .unwrap();

        let (child, sync) = req.into_child("c1".to_string());
        assert_eq!(child.id, "c1");
        assert_eq!(sync, AssociationSync { needs: false, allergies: true });
    }
}
