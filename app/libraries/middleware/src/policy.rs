use crate::CurrentUser;
use app_error::AppError;
use app_schema::auth::users::Role;

const ANY_STAFF: &[Role] = &[Role::Admin, Role::Operator];
const ADMIN_ONLY: &[Role] = &[Role::Admin];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateCustomer,
    ListCustomers,
    ReadCustomer,
    UpdateCustomer,
    DeleteCustomer,
    CreateBill,
    ListBills,
    ReadBill,
    UpdateBill,
    DeleteBill,
    CreateUser,
}

impl Action {
    pub fn allowed_roles(self) -> &'static [Role] {
        match self {
            Self::CreateCustomer
            | Self::ListCustomers
            | Self::ReadCustomer
            | Self::CreateBill
            | Self::ListBills
            | Self::ReadBill => ANY_STAFF,
            Self::UpdateCustomer
            | Self::DeleteCustomer
            | Self::UpdateBill
            | Self::DeleteBill
            | Self::CreateUser => ADMIN_ONLY,
        }
    }
}

pub fn authorize(user: &CurrentUser, action: Action) -> Result<(), AppError> {
    if action.allowed_roles().contains(&user.role) {
        Ok(())
    } else {
        tracing::info!("{} ({}) denied {:?}", &user.username, user.role, action);
        Err(AppError::forbidden("Not enough permissions"))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn user(role: Role) -> CurrentUser {
        CurrentUser {
            username: "someone".to_owned(),
            role,
            is_active: true,
        }
    }

    #[test]
    fn operator_reads_and_creates_only() {
        let operator = user(Role::Operator);
        for action in [
            Action::CreateCustomer,
            Action::ListCustomers,
            Action::ReadCustomer,
            Action::CreateBill,
            Action::ListBills,
            Action::ReadBill,
        ] {
            assert!(authorize(&operator, action).is_ok(), "{action:?}");
        }
        for action in [
            Action::UpdateCustomer,
            Action::DeleteCustomer,
            Action::UpdateBill,
            Action::DeleteBill,
            Action::CreateUser,
        ] {
            let err = authorize(&operator, action).unwrap_err();
            assert_eq!(err.status.as_u16(), 403, "{action:?}");
        }
    }

    #[test]
    fn admin_may_do_everything() {
        let admin = user(Role::Admin);
        assert!(authorize(&admin, Action::DeleteCustomer).is_ok());
        assert!(authorize(&admin, Action::DeleteBill).is_ok());
        assert!(authorize(&admin, Action::CreateUser).is_ok());
    }
}
