use crate::models::User;

/// In-process directory of department members.
///
/// The deployment ships a fixed roster; there is no account management on the
/// terminal side. Lookups by name, badge or username are case-insensitive
/// substring matches, job filters compare keys ignoring case.
#[derive(Debug, Clone)]
pub struct Directory {
    users: Vec<User>,
}

impl Directory {
    /// Directory over the roster bundled with the terminal.
    pub fn bundled() -> Self {
        Self::with_users(bundled_users())
    }

    pub fn with_users(users: Vec<User>) -> Self {
        Self { users }
    }

    pub fn all(&self) -> &[User] {
        &self.users
    }

    pub fn by_id(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn by_username(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|u| u.username == username)
    }

    pub fn by_job(&self, job: &str) -> Vec<&User> {
        let job = job.to_lowercase();
        self.users
            .iter()
            .filter(|u| u.job.to_lowercase() == job)
            .collect()
    }

    /// Matches `query` against name, badge and username.
    pub fn search(&self, query: &str) -> Vec<&User> {
        let query = query.to_lowercase();
        self.users
            .iter()
            .filter(|u| {
                u.name.to_lowercase().contains(&query)
                    || u.badge
                        .as_deref()
                        .is_some_and(|b| b.to_lowercase().contains(&query))
                    || u.username.to_lowercase().contains(&query)
            })
            .collect()
    }
}

fn bundled_users() -> Vec<User> {
    fn user(id: &str, username: &str, job: &str, grade: u8, name: &str, badge: Option<&str>) -> User {
        User {
            id: id.to_string(),
            username: username.to_string(),
            job: job.to_string(),
            grade,
            name: name.to_string(),
            badge: badge.map(str::to_string),
        }
    }

    vec![
        user("1", "agent.smith", "lspd", 3, "Agent Smith", Some("12345")),
        user("2", "dr.wilson", "lsdph", 4, "Dr. Wilson", Some("67890")),
        user("3", "p.martin", "lspd", 1, "Paul Martin", Some("10482")),
        user("4", "j.reyes", "lsfd", 2, "Julia Reyes", Some("30571")),
        user("5", "m.chen", "fib", 4, "Marcus Chen", None),
        user("6", "a.dubois", "doj", 5, "Amélie Dubois", Some("70012")),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_roster_is_populated() {
        let dir = Directory::bundled();
        assert!(dir.all().len() >= 2);
        assert!(dir.by_id("1").is_some());
        assert!(dir.by_username("dr.wilson").is_some());
    }

    #[test]
    fn by_job_filters_ignoring_case() {
        let dir = Directory::bundled();
        let officers = dir.by_job("LSPD");
        assert!(!officers.is_empty());
        assert!(officers.iter().all(|u| u.job == "lspd"));
    }

    #[test]
    fn search_matches_name_badge_and_username() {
        let dir = Directory::bundled();
        assert!(dir.search("smith").iter().any(|u| u.id == "1"));
        assert!(dir.search("67890").iter().any(|u| u.id == "2"));
        assert!(dir.search("M.CHEN").iter().any(|u| u.id == "5"));
        assert!(dir.search("nobody-here").is_empty());
    }

    #[test]
    fn search_without_badge_does_not_match_badge_queries() {
        let dir = Directory::bundled();
        // Marcus Chen has no badge; only name and username can match him.
        assert!(dir.search("chen").iter().any(|u| u.id == "5"));
        assert!(!dir.search("99999").iter().any(|u| u.id == "5"));
    }
}
