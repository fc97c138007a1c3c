//! Role transition policy
//!
//! The legal role-progression graph as a pure, total decision function.
//! Every (current, requested) pair maps to an explicit decision; legality is
//! never inferred from enum ordering.

use crate::core::models::user::UserRole;

/// Decide whether a role transition may be applied.
///
/// `current` and `requested` describe the subject of the change; `acting` is
/// the role of the identity resolving the request. The table:
///
/// - no-op transitions are denied,
/// - an ADMIN subject keeps that role permanently,
/// - USER may become ARTIST,
/// - USER and ARTIST may become ENTERPRISE,
/// - ADMIN is granted only by an acting ADMIN,
/// - everything else is denied.
pub fn is_allowed(current: UserRole, requested: UserRole, acting: UserRole) -> bool {
    use UserRole::*;

    if current == requested {
        return false;
    }
    if current == Admin {
        return false;
    }

    match (current, requested) {
        (User, Artist) => true,
        (User, Enterprise) | (Artist, Enterprise) => true,
        (_, Admin) => acting == Admin,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use UserRole::*;

    // The full table from the admin actor's point of view.
    const ADMIN_ACTOR_TABLE: [(UserRole, UserRole, bool); 16] = [
        (User, User, false),
        (User, Artist, true),
        (User, Enterprise, true),
        (User, Admin, true),
        (Artist, User, false),
        (Artist, Artist, false),
        (Artist, Enterprise, true),
        (Artist, Admin, true),
        (Enterprise, User, false),
        (Enterprise, Artist, false),
        (Enterprise, Enterprise, false),
        (Enterprise, Admin, true),
        (Admin, User, false),
        (Admin, Artist, false),
        (Admin, Enterprise, false),
        (Admin, Admin, false),
    ];

    #[test]
    fn test_table_with_admin_actor() {
        for (current, requested, expected) in ADMIN_ACTOR_TABLE {
            assert_eq!(
                is_allowed(current, requested, Admin),
                expected,
                "({current}, {requested}) resolved by ADMIN"
            );
        }
    }

    #[test]
    fn test_admin_grant_requires_admin_actor() {
        for acting in [User, Artist, Enterprise] {
            for current in [User, Artist, Enterprise] {
                assert!(
                    !is_allowed(current, Admin, acting),
                    "{current} -> ADMIN must be denied for acting role {acting}"
                );
            }
        }
        for current in [User, Artist, Enterprise] {
            assert!(is_allowed(current, Admin, Admin));
        }
    }

    #[test]
    fn test_non_admin_grants_ignore_actor() {
        for acting in UserRole::ALL {
            assert!(is_allowed(User, Artist, acting));
            assert!(is_allowed(User, Enterprise, acting));
            assert!(is_allowed(Artist, Enterprise, acting));
            assert!(!is_allowed(Artist, User, acting));
            assert!(!is_allowed(Enterprise, Artist, acting));
        }
    }

    #[test]
    fn test_total_and_deterministic() {
        for current in UserRole::ALL {
            for requested in UserRole::ALL {
                for acting in UserRole::ALL {
                    let first = is_allowed(current, requested, acting);
                    let second = is_allowed(current, requested, acting);
                    assert_eq!(first, second);
                }
            }
        }
    }

    #[test]
    fn test_admin_is_terminal_for_subject() {
        for requested in UserRole::ALL {
            for acting in UserRole::ALL {
                assert!(!is_allowed(Admin, requested, acting));
            }
        }
    }
}
