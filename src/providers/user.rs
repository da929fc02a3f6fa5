//! User context provider.

/// The user the telemetry is attributed to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct User {
    /// Anonymous user id.
    pub id: Option<String>,

    /// Id of the authenticated user, set by the host after sign-in.
    pub authenticated_id: Option<String>,

    pub account_id: Option<String>,
}

impl User {
    /// Attaches an authenticated user and, optionally, an account.
    ///
    /// Ids containing `,` `;` `=` `|` or a space would corrupt the
    /// delimited formats they are later carried in, so they are rejected with
    /// a warning and the provider is left unchanged. Returns whether the ids
    /// were accepted.
    ///
    /// # Example
    ///
    /// ```
    /// use telemetry_context::providers::User;
    ///
    /// let mut user = User::default();
    /// assert!(user.set_authenticated_user_context("alice", Some("contoso")));
    /// assert!(!user.set_authenticated_user_context("bob;admin", None));
    /// assert_eq!(user.authenticated_id.as_deref(), Some("alice"));
    /// ```
    pub fn set_authenticated_user_context(
        &mut self,
        authenticated_id: &str,
        account_id: Option<&str>,
    ) -> bool {
        if !is_valid_user_input(authenticated_id)
            || account_id.is_some_and(|id| !is_valid_user_input(id))
        {
            tracing::warn!(
                authenticated_id = %authenticated_id,
                "rejected authenticated user context: ids must be non-empty and free of delimiters"
            );
            return false;
        }

        self.authenticated_id = Some(authenticated_id.to_string());
        self.account_id = account_id.map(String::from);
        true
    }

    /// Removes the authenticated user and account ids.
    pub fn clear_authenticated_user_context(&mut self) {
        self.authenticated_id = None;
        self.account_id = None;
    }
}

fn is_valid_user_input(id: &str) -> bool {
    !id.is_empty()
        && !id.chars().any(|c| matches!(c, ',' | ';' | '=' | '|' | ' '))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_delimiters_in_either_id() {
        let mut user = User::default();

        for bad in ["", "a b", "a,b", "a;b", "a=b", "a|b"] {
            assert!(!user.set_authenticated_user_context(bad, None), "{bad:?}");
        }
        assert!(!user.set_authenticated_user_context("alice", Some("acc=1")));
        assert!(user.authenticated_id.is_none());
        assert!(user.account_id.is_none());
    }

    #[test]
    fn only_the_space_character_is_a_delimiter() {
        let mut user = User::default();

        assert!(user.set_authenticated_user_context("alice\tsmith", Some("acc\n1")));
        assert_eq!(user.authenticated_id.as_deref(), Some("alice\tsmith"));
        assert_eq!(user.account_id.as_deref(), Some("acc\n1"));
    }

    #[test]
    fn clear_keeps_anonymous_id() {
        let mut user = User {
            id: Some("anon".to_string()),
            ..User::default()
        };
        assert!(user.set_authenticated_user_context("alice", Some("contoso")));

        user.clear_authenticated_user_context();
        assert_eq!(user.id.as_deref(), Some("anon"));
        assert!(user.authenticated_id.is_none());
        assert!(user.account_id.is_none());
    }
}
