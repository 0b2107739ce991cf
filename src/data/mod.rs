//! This module contains everything relating to [Data].

use std::collections::HashSet;

use serenity::UserId;
use url::Url;

use crate::automod::AutomodResponder;
use crate::serenity;

/// The data kept between shards
#[derive(Debug)]
pub struct Data {
    /// List of users to send bug notifications
    pub notify_list: HashSet<UserId>,
    /// Answers automod triggers
    pub automod: AutomodResponder,
    /// Linked by `/github`
    pub github_repository: Url,
    /// Posted in servers the bot joins
    pub welcome_message: String,
}
