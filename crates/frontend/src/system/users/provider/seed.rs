use chrono::{NaiveDate, NaiveDateTime};
use contracts::system::users::{Group, User, UserStatus};

use super::in_memory::avatar_url;

struct SeedUser {
    name: &'static str,
    email: &'static str,
    status: UserStatus,
    group: &'static str,
    role: &'static str,
    join_date: &'static str,
    last_login: &'static str,
    background: &'static str,
    color: &'static str,
}

const USERS: &[SeedUser] = &[
    SeedUser {
        name: "John Doe",
        email: "john.doe@example.com",
        status: UserStatus::Active,
        group: "Administrators",
        role: "Admin",
        join_date: "2023-01-15",
        last_login: "2024-08-13 09:30:00",
        background: "007bff",
        color: "fff",
    },
    SeedUser {
        name: "Jane Smith",
        email: "jane.smith@example.com",
        status: UserStatus::Active,
        group: "Developers",
        role: "Senior Developer",
        join_date: "2023-02-20",
        last_login: "2024-08-12 16:45:00",
        background: "28a745",
        color: "fff",
    },
    SeedUser {
        name: "Mike Johnson",
        email: "mike.johnson@example.com",
        status: UserStatus::Inactive,
        group: "Support",
        role: "Support Agent",
        join_date: "2023-03-10",
        last_login: "2024-08-10 14:20:00",
        background: "dc3545",
        color: "fff",
    },
    SeedUser {
        name: "Sarah Wilson",
        email: "sarah.wilson@example.com",
        status: UserStatus::Active,
        group: "Developers",
        role: "Frontend Developer",
        join_date: "2023-04-05",
        last_login: "2024-08-13 08:15:00",
        background: "ffc107",
        color: "000",
    },
    SeedUser {
        name: "David Brown",
        email: "david.brown@example.com",
        status: UserStatus::Active,
        group: "Administrators",
        role: "System Admin",
        join_date: "2023-05-12",
        last_login: "2024-08-13 07:00:00",
        background: "6f42c1",
        color: "fff",
    },
    SeedUser {
        name: "Emily Davis",
        email: "emily.davis@example.com",
        status: UserStatus::Inactive,
        group: "Support",
        role: "Customer Success",
        join_date: "2023-06-18",
        last_login: "2024-08-09 12:30:00",
        background: "e83e8c",
        color: "fff",
    },
    SeedUser {
        name: "Robert Taylor",
        email: "robert.taylor@example.com",
        status: UserStatus::Active,
        group: "Developers",
        role: "Backend Developer",
        join_date: "2023-07-22",
        last_login: "2024-08-13 10:45:00",
        background: "20c997",
        color: "fff",
    },
    SeedUser {
        name: "Lisa Anderson",
        email: "lisa.anderson@example.com",
        status: UserStatus::Active,
        group: "Administrators",
        role: "Project Manager",
        join_date: "2023-08-30",
        last_login: "2024-08-13 11:20:00",
        background: "fd7e14",
        color: "fff",
    },
    SeedUser {
        name: "Chris Martinez",
        email: "chris.martinez@example.com",
        status: UserStatus::Active,
        group: "Support",
        role: "Technical Support",
        join_date: "2023-09-14",
        last_login: "2024-08-12 17:30:00",
        background: "6610f2",
        color: "fff",
    },
    SeedUser {
        name: "Amanda White",
        email: "amanda.white@example.com",
        status: UserStatus::Inactive,
        group: "Developers",
        role: "UI/UX Designer",
        join_date: "2023-10-08",
        last_login: "2024-08-11 13:15:00",
        background: "d63384",
        color: "fff",
    },
    SeedUser {
        name: "Kevin Garcia",
        email: "kevin.garcia@example.com",
        status: UserStatus::Active,
        group: "Developers",
        role: "Full Stack Developer",
        join_date: "2023-11-20",
        last_login: "2024-08-13 09:00:00",
        background: "198754",
        color: "fff",
    },
    SeedUser {
        name: "Michelle Lee",
        email: "michelle.lee@example.com",
        status: UserStatus::Active,
        group: "Support",
        role: "Quality Assurance",
        join_date: "2023-12-03",
        last_login: "2024-08-13 08:45:00",
        background: "0dcaf0",
        color: "000",
    },
];

const GROUPS: &[(&str, &str)] = &[
    ("Administrators", "System administrators with full access"),
    ("Developers", "Development team members"),
    ("Support", "Customer support and QA team"),
];

pub(super) fn users() -> Vec<User> {
    USERS
        .iter()
        .zip(1u64..)
        .map(|(seed, id)| User {
            id,
            name: seed.name.to_string(),
            email: seed.email.to_string(),
            status: seed.status,
            groups: [seed.group.to_string()].into_iter().collect(),
            role: Some(seed.role.to_string()),
            join_date: NaiveDate::parse_from_str(seed.join_date, "%Y-%m-%d").unwrap_or_default(),
            last_login: NaiveDateTime::parse_from_str(seed.last_login, "%Y-%m-%d %H:%M:%S")
                .unwrap_or_default(),
            avatar: Some(avatar_url(seed.name, seed.background, seed.color)),
        })
        .collect()
}

pub(super) fn groups() -> Vec<Group> {
    GROUPS
        .iter()
        .zip(1u64..)
        .map(|((name, description), id)| Group {
            id,
            name: name.to_string(),
            description: description.to_string(),
        })
        .collect()
}
