use std::sync::{PoisonError, RwLock};

/// Profile fields returned by the profile service after an update.
pub type ProfileFragment = serde_json::Map<String, serde_json::Value>;

/// Read access to the signed-in user, plus a way to fold update results back
/// into the client-side copy of their profile.
pub trait SessionSource: Send + Sync {
    fn current_user_id(&self) -> Option<String>;
    fn merge_profile(&self, fragment: ProfileFragment);
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UserProfile {
    pub id: String,
    #[serde(flatten)]
    pub fields: ProfileFragment,
}

impl UserProfile {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: ProfileFragment::new(),
        }
    }

    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(|v| v.as_str())
    }

    /// Overwrites fields by key. The identifier is never taken from the
    /// fragment.
    pub fn merge(&mut self, fragment: ProfileFragment) {
        for (key, value) in fragment {
            if key == "id" {
                continue;
            }
            self.fields.insert(key, value);
        }
    }
}

/// In-process session state: the signed-in user, if any.
#[derive(Debug, Default)]
pub struct UserSession {
    user: RwLock<Option<UserProfile>>,
}

impl UserSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signed_in(profile: UserProfile) -> Self {
        Self {
            user: RwLock::new(Some(profile)),
        }
    }

    pub fn sign_in(&self, profile: UserProfile) {
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = Some(profile);
    }

    pub fn sign_out(&self) {
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn profile(&self) -> Option<UserProfile> {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl SessionSource for UserSession {
    fn current_user_id(&self) -> Option<String> {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|user| user.id.clone())
            .filter(|id| !id.is_empty())
    }

    fn merge_profile(&self, fragment: ProfileFragment) {
        let mut user = self.user.write().unwrap_or_else(PoisonError::into_inner);
        match user.as_mut() {
            Some(profile) => profile.merge(fragment),
            None => tracing::warn!("profile_merge_without_user"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fragment(value: serde_json::Value) -> ProfileFragment {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn merge_never_overwrites_id() {
        let mut profile = UserProfile::new("u-1");
        profile.merge(fragment(json!({ "id": "u-2", "email": "a@b.co" })));

        assert_eq!(profile.id, "u-1");
        assert_eq!(profile.field("email"), Some("a@b.co"));
        assert!(!profile.fields.contains_key("id"));
    }

    #[test]
    fn merge_overwrites_existing_fields() {
        let mut profile = UserProfile::new("u-1");
        profile.merge(fragment(json!({ "firstName": "Ada", "lastName": "Byron" })));
        profile.merge(fragment(json!({ "lastName": "Lovelace" })));

        assert_eq!(profile.field("firstName"), Some("Ada"));
        assert_eq!(profile.field("lastName"), Some("Lovelace"));
    }

    #[test]
    fn session_reports_signed_in_user() {
        let session = UserSession::new();
        assert_eq!(session.current_user_id(), None);

        session.sign_in(UserProfile::new("u-1"));
        assert_eq!(session.current_user_id().as_deref(), Some("u-1"));

        session.sign_out();
        assert_eq!(session.current_user_id(), None);
    }

    #[test]
    fn blank_user_id_counts_as_signed_out() {
        let session = UserSession::signed_in(UserProfile::new(""));
        assert_eq!(session.current_user_id(), None);
    }

    #[test]
    fn merge_without_user_is_ignored() {
        let session = UserSession::new();
        session.merge_profile(fragment(json!({ "email": "a@b.co" })));
        assert!(session.profile().is_none());
    }
}
