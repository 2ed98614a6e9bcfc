//! User Model (staff member / actor)

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Staff role
///
/// The canonical enum. The original data mixes `'ADMIN'`/`'admin'` and
/// `'COACH'`/`'coach'`, so deserialization is case-insensitive; serialization
/// always emits the uppercase form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Coach,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Coach => "COACH",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Role::Admin),
            "COACH" => Ok(Role::Coach),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

impl Serialize for Role {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Permission category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionCategory {
    Clients,
    Billing,
    Calendar,
    Settings,
    Reports,
}

/// A single granted permission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Permission {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: PermissionCategory,
}

impl Permission {
    fn new(
        id: &str,
        name: &str,
        description: &str,
        category: PermissionCategory,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            category,
        }
    }
}

/// Default permission set for a role.
///
/// The set is copied onto the user at creation time, not referenced: later
/// changes to the defaults never retroactively change existing users.
pub fn default_permissions(role: Role) -> Vec<Permission> {
    use PermissionCategory::*;
    match role {
        Role::Admin => vec![
            Permission::new("clients.view", "Voir clients", "Voir tous les clients", Clients),
            Permission::new("clients.create", "Créer clients", "Créer de nouveaux clients", Clients),
            Permission::new("clients.edit", "Modifier clients", "Modifier les clients existants", Clients),
            Permission::new("clients.delete", "Supprimer clients", "Supprimer des clients", Clients),
            Permission::new("billing.view", "Voir facturation", "Voir toutes les factures", Billing),
            Permission::new("billing.create", "Créer factures", "Créer des factures", Billing),
            Permission::new("billing.edit", "Modifier factures", "Modifier les factures", Billing),
            Permission::new("calendar.view", "Voir planning", "Voir tout le planning", Calendar),
            Permission::new("calendar.create", "Créer événements", "Créer des événements", Calendar),
            Permission::new("calendar.edit", "Modifier événements", "Modifier les événements", Calendar),
            Permission::new("settings.manage", "Gérer paramètres", "Gérer les paramètres système", Settings),
            Permission::new("staff.manage", "Gérer équipe", "Gérer les utilisateurs", Settings),
            Permission::new("reports.view", "Voir rapports", "Voir tous les rapports", Reports),
            Permission::new("dashboard.view", "Voir dashboard", "Accéder au dashboard global", Reports),
            Permission::new("pipeline.all", "Pipeline global", "Voir tous les leads", Clients),
            Permission::new("assign.leads", "Assigner leads", "Assigner des leads aux coachs", Clients),
        ],
        Role::Coach => vec![
            Permission::new("clients.view.own", "Voir ses clients", "Voir ses clients assignés", Clients),
            Permission::new("clients.edit.own", "Modifier ses clients", "Modifier ses clients", Clients),
            Permission::new("billing.view.own", "Voir ses factures", "Voir ses factures", Billing),
            Permission::new("billing.create.own", "Créer ses factures", "Créer des factures pour ses clients", Billing),
            Permission::new("calendar.view.own", "Voir son planning", "Voir son planning", Calendar),
            Permission::new("calendar.create.own", "Créer ses événements", "Créer ses événements", Calendar),
            Permission::new("calendar.edit.own", "Modifier ses événements", "Modifier ses événements", Calendar),
            Permission::new("pipeline.own", "Pipeline personnel", "Voir ses propres leads", Clients),
        ],
    }
}

/// Staff member / actor
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub specialties: Vec<String>,
    pub is_active: bool,
    /// Creation time (Unix millis)
    pub created_at: i64,
    /// Last login time (Unix millis)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<i64>,
    pub permissions: Vec<Permission>,
}

/// Create staff payload
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserCreate {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub phone: String,
    pub role: Role,
    #[serde(default)]
    pub specialties: Vec<String>,
}

/// Update staff payload
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<Role>,
    pub specialties: Option<Vec<String>>,
    pub is_active: Option<bool>,
    pub permissions: Option<Vec<Permission>>,
}
