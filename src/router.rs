//! Path-style routes for the views.

use std::fmt;

/// A resolved route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    /// `/`: the post list.
    #[default]
    Index,
    /// `/post/{number}`: one post and its comments.
    Post(u64),
    /// Anything else.
    NotFound,
}

impl Route {
    /// Resolve a path.
    ///
    /// Issue numbers must be positive integers; a zero or non-numeric id is
    /// `NotFound`. A single trailing slash is tolerated.
    pub fn parse(path: &str) -> Self {
        let path = path.trim();
        let path = if path.len() > 1 {
            path.strip_suffix('/').unwrap_or(path)
        } else {
            path
        };

        if path == "/" || path.is_empty() {
            return Route::Index;
        }

        match path.strip_prefix("/post/") {
            Some(id) if !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()) => {
                match id.parse::<u64>() {
                    Ok(n) if n > 0 => Route::Post(n),
                    _ => Route::NotFound,
                }
            }
            _ => Route::NotFound,
        }
    }

    /// The canonical path for this route.
    pub fn path(&self) -> String {
        match self {
            Route::Index => "/".to_string(),
            Route::Post(n) => format!("/post/{}", n),
            Route::NotFound => "/404".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Navigation history; the bottom entry is always a route.
#[derive(Debug, Clone)]
pub struct History {
    stack: Vec<Route>,
}

impl History {
    pub fn new(start: Route) -> Self {
        Self { stack: vec![start] }
    }

    pub fn current(&self) -> Route {
        self.stack.last().copied().unwrap_or_default()
    }

    /// Navigate to `route`. Navigating to the current route is a no-op.
    pub fn push(&mut self, route: Route) {
        if self.current() != route {
            self.stack.push(route);
        }
    }

    /// Go back one step, or to the index when there is nowhere to go back to.
    pub fn back(&mut self) -> Route {
        if self.stack.len() > 1 {
            self.stack.pop();
        } else {
            self.stack = vec![Route::Index];
        }
        self.current()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(Route::Index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_index() {
        assert_eq!(Route::parse("/"), Route::Index);
        assert_eq!(Route::parse(""), Route::Index);
    }

    #[test]
    fn test_parse_post() {
        assert_eq!(Route::parse("/post/42"), Route::Post(42));
        assert_eq!(Route::parse("/post/42/"), Route::Post(42));
    }

    #[test]
    fn test_parse_malformed_post_id_is_not_found() {
        assert_eq!(Route::parse("/post/abc"), Route::NotFound);
        assert_eq!(Route::parse("/post/0"), Route::NotFound);
        assert_eq!(Route::parse("/post/-3"), Route::NotFound);
        assert_eq!(Route::parse("/post/"), Route::NotFound);
        assert_eq!(Route::parse("/post/99999999999999999999999"), Route::NotFound);
    }

    #[test]
    fn test_parse_unknown_path() {
        assert_eq!(Route::parse("/about"), Route::NotFound);
        assert_eq!(Route::parse("/post/1/comments"), Route::NotFound);
    }

    #[test]
    fn test_path_round_trips() {
        assert_eq!(Route::parse(&Route::Post(7).path()), Route::Post(7));
        assert_eq!(Route::Index.to_string(), "/");
    }

    #[test]
    fn test_history_back() {
        let mut history = History::new(Route::Index);
        history.push(Route::Post(5));
        history.push(Route::Post(5));
        assert_eq!(history.stack.len(), 2);
        assert_eq!(history.back(), Route::Index);
        assert_eq!(history.back(), Route::Index);
    }

    #[test]
    fn test_history_back_from_deep_link() {
        let mut history = History::new(Route::Post(3));
        assert_eq!(history.back(), Route::Index);
    }
}
