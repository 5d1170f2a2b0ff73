use chrono::NaiveDate;

use super::Role;

#[derive(Debug, Clone)]
pub struct CreateUserDto {
    pub name: String,
    pub email: String,
    pub birth_date: NaiveDate,
    pub role: Option<Role>,
    pub password: String,
}
