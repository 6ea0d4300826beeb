use serde::Serialize;

/// Dashboard account holder
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User ID
    pub id: u32,
    /// Login name, unique across the store
    pub username: String,
    /// Never leaves the process
    #[serde(skip_serializing)]
    pub password: String,
    /// Display name
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// User fields prior to id assignment
#[derive(Clone, Debug)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub name: String,
    pub email: String,
    pub avatar_url: Option<String>,
}

impl NewUser {
    pub fn into_user(self, id: u32) -> User {
        User {
            id,
            username: self.username,
            password: self.password,
            name: self.name,
            email: self.email,
            avatar_url: self.avatar_url,
        }
    }
}
