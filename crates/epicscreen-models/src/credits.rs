use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub character: String,
    #[serde(default)]
    pub profile_path: Option<String>,
    #[serde(default)]
    pub order: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CrewMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub job: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub profile_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct MovieCredits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

impl MovieCredits {
    /// Top-billed cast, ordered by billing position
    pub fn top_cast(&self, n: usize) -> Vec<CastMember> {
        let mut cast = self.cast.clone();
        cast.sort_by_key(|c| c.order);
        cast.truncate(n);
        cast
    }

    pub fn directors(&self) -> impl Iterator<Item = &CrewMember> {
        self.crew.iter().filter(|c| c.job == "Director")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cast(id: u64, order: u32) -> CastMember {
        CastMember {
            id,
            name: format!("Actor {}", id),
            character: String::new(),
            profile_path: None,
            order,
        }
    }

    #[test]
    fn test_top_cast_orders_by_billing() {
        let credits = MovieCredits {
            cast: vec![cast(1, 2), cast(2, 0), cast(3, 1)],
            crew: vec![],
        };
        let top: Vec<u64> = credits.top_cast(2).iter().map(|c| c.id).collect();
        assert_eq!(top, vec![2, 3]);
    }

    #[test]
    fn test_directors() {
        let credits = MovieCredits {
            cast: vec![],
            crew: vec![
                CrewMember { id: 1, name: "A".into(), job: "Director".into(), department: "Directing".into(), profile_path: None },
                CrewMember { id: 2, name: "B".into(), job: "Producer".into(), department: "Production".into(), profile_path: None },
            ],
        };
        let names: Vec<&str> = credits.directors().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["A"]);
    }
}
