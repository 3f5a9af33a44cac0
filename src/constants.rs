//! Process-wide, read-only response message constants.

pub const SUCCESS: &str = "success";
pub const ERROR: &str = "error";

pub const ADD_USERS_SUCCESS_MSG: &str = "Users added successfully";
pub const ADD_USERS_CONFLICT_MSG: &str = "Given email ids already exist.";

pub const ADD_AVAILABILITY_SUCCESS_MSG: &str = "Availability added successfully.";
pub const ADD_AVAILABILITY_CONFLICT_MSG: &str = "Availability already exists.";

pub const DELETE_AVAILABILITY_SUCCESS_MSG: &str = "Deleted availability successfully.";

pub const RECURRING_AVAILABILITY_SUCCESS_MSG: &str = "Recurring availability added successfully";
pub const RECURRING_AVAILABILITY_CONFLICT_MSG: &str = "Recurring availability already exists.";
