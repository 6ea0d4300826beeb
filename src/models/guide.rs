use serde::Serialize;

/// Static help article shown on the documentation page
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Guide {
    pub id: u32,
    pub title: String,
    pub description: String,
    /// Icon key understood by the dashboard (book, shield, lightbulb)
    pub icon_name: String,
}

#[derive(Clone, Debug)]
pub struct NewGuide {
    pub title: String,
    pub description: String,
    pub icon_name: String,
}

impl NewGuide {
    pub fn into_guide(self, id: u32) -> Guide {
        Guide {
            id,
            title: self.title,
            description: self.description,
            icon_name: self.icon_name,
        }
    }
}
