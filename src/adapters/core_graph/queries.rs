//! GraphQL documents sent to the core graph service.

pub const FIND_PROFILES: &str = r#"
query FindUser($firstName: String, $lastName: String, $email: String, $username: String, $skip: Int, $take: Int) {
  profiles(
    window: { take: $take, skip: $skip }
    filter: {
      isActive: { exact: true }
      email: { pattern: $email, ignoreCase: true }
      firstName: { pattern: $firstName, ignoreCase: true }
      lastName: { pattern: $lastName, ignoreCase: true }
      username: { pattern: $username, ignoreCase: true }
    }
  ) {
    count
    result {
      id
      createdAt
      email
      firstName
      lastName
      username
      user {
        id
        cognitoId
        lastSignIn
        isDeactivated
        subscriber {
          id
          isActive
        }
        recentMembership {
          id
          status
          since
          updatedAt
          killbillSubscriptionId
          killbillPaymentMethodExternalKey
          killbillPaymentMethodPluginName
        }
        memberships {
          id
          status
          since
          killbillSubscriptionId
          killbillPaymentMethodExternalKey
        }
        userDevices {
          id
        }
      }
    }
  }
}
"#;

pub const USER_BY_ID: &str = r#"
query UserByID($userId: ID!) {
  user(id: $userId) {
    id
    cognitoId
    profile {
      firstName
      lastName
      email
      username
    }
    recentMembership {
      status
      killbillPaymentMethodExternalKey
      killbillPaymentMethodPluginName
    }
    subscriber {
      convertkitId
      isActive
    }
  }
}
"#;

pub const UPDATE_ACCOUNT_EMAIL: &str = r#"
mutation UpdateAccount($email: String!, $id: ID!) {
  updateAccount(input: { user: $id, email: $email }) {
    id
  }
}
"#;

pub const UPDATE_PROFILE: &str = r#"
mutation UpdateProfile($user: ID!, $firstName: String, $lastName: String, $username: String) {
  updateAccount(input: { user: $user, firstName: $firstName, lastName: $lastName, username: $username }) {
    id
  }
}
"#;

pub const UPDATE_USER_DEACTIVATED: &str = r#"
mutation UpdateUser($id: ID!, $deactivated: Boolean) {
  updateUser(input: { id: $id, isDeactivated: $deactivated }) {
    id
  }
}
"#;

/// The graph has no cascading delete; each collection keyed by the user is
/// erased explicitly, the user record last.
pub const DELETE_ACCOUNT: &str = r#"
mutation DeleteAccount($userId: String) {
  deleteUsers(filter: { id: { exact: $userId } }) {
    count
  }
  eraseSubscribers(filter: { user: { exact: $userId } }) {
    count
  }
  eraseMemberships(filter: { user: { exact: $userId } }) {
    count
  }
  eraseProfiles(filter: { user: { exact: $userId } }) {
    count
  }
  eraseUserDevices(filter: { user: { exact: $userId } }) {
    count
  }
  eraseNotifications(filter: { user: { exact: $userId } }) {
    count
  }
  eraseUsers(filter: { id: { exact: $userId } }) {
    count
  }
}
"#;
