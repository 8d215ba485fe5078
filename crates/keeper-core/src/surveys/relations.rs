use super::domain::{Role, User};

/// Case/whitespace-normalized department name.
pub(crate) fn normalize_department(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// The user's normalized primary department, if one is set.
pub fn primary_department(user: &User) -> Option<String> {
    user.department
        .as_deref()
        .map(normalize_department)
        .filter(|department| !department.is_empty())
}

/// All normalized departments of a user: the primary one plus any secondary
/// list, deduplicated.
pub fn all_departments(user: &User) -> Vec<String> {
    let mut departments: Vec<String> = user
        .departments
        .iter()
        .map(|department| normalize_department(department))
        .filter(|department| !department.is_empty())
        .collect();
    if let Some(primary) = primary_department(user) {
        departments.push(primary);
    }
    departments.dedup();
    departments.sort();
    departments.dedup();
    departments
}

/// Roles a user of the given role may evaluate through a manager form.
/// Strict rank-step: an employee evaluates their manager only; a manager
/// evaluates coordinators or directors; a coordinator evaluates directors;
/// directors and admins evaluate nobody upward.
pub const fn superior_roles(role: Role) -> &'static [Role] {
    match role {
        Role::Employee => &[Role::Manager],
        Role::Manager => &[Role::Coordinator, Role::Director],
        Role::Coordinator => &[Role::Director],
        Role::Director | Role::Admin => &[],
    }
}

/// Teammate eligibility for peer-evaluation forms: same primary department,
/// role employee, and not the acting user.
pub fn is_teammate(acting: &User, candidate: &User) -> bool {
    if candidate.id == acting.id || candidate.role != Role::Employee {
        return false;
    }
    match (primary_department(acting), primary_department(candidate)) {
        (Some(acting_department), Some(candidate_department)) => {
            acting_department == candidate_department
        }
        _ => false,
    }
}

/// Superior eligibility for manager-evaluation forms. The candidate must
/// hold one of the acting user's valid superior roles, outrank them, not be
/// them, and share a department — the acting user's primary department is
/// checked against the candidate's primary and secondary departments, since
/// senior roles commonly span several.
pub fn is_superior(acting: &User, candidate: &User) -> bool {
    if candidate.id == acting.id {
        return false;
    }
    if candidate.role.rank() <= acting.role.rank() {
        return false;
    }
    if !superior_roles(acting.role).contains(&candidate.role) {
        return false;
    }
    let Some(acting_department) = primary_department(acting) else {
        return false;
    };
    all_departments(candidate).contains(&acting_department)
}

/// All eligible peer-evaluation targets for the acting user.
pub fn teammates<'a>(acting: &User, users: &'a [User]) -> Vec<&'a User> {
    users
        .iter()
        .filter(|candidate| is_teammate(acting, candidate))
        .collect()
}

/// All eligible manager-evaluation targets for the acting user.
pub fn superiors<'a>(acting: &User, users: &'a [User]) -> Vec<&'a User> {
    users
        .iter()
        .filter(|candidate| is_superior(acting, candidate))
        .collect()
}
