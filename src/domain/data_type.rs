//! The closed set of `dataType` tags and the leaf view each one selects.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Recognized `dataType` tags of a data leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DataType {
    CityAccommodation,
    BankAccountDonation,
    CreditCardDonation,
    InternationalBankAccountDonation,
    InternationalUrlDonation,
    GatheringList,
    HelpItemList,
    UrlDonation,
    SmsDonation,
}

/// Leaf views a tag can resolve to. Several tags may share one view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewKind {
    CityAccommodation,
    BankData,
    CreditCardData,
    UrlData,
    GatheringData,
    HelpItemData,
    SmsData,
}

impl DataType {
    /// All tags in dispatch priority order.
    pub const ALL: [DataType; 9] = [
        DataType::CityAccommodation,
        DataType::BankAccountDonation,
        DataType::CreditCardDonation,
        DataType::InternationalBankAccountDonation,
        DataType::InternationalUrlDonation,
        DataType::GatheringList,
        DataType::HelpItemList,
        DataType::UrlDonation,
        DataType::SmsDonation,
    ];

    /// Wire representation of the tag.
    pub const fn as_str(self) -> &'static str {
        match self {
            DataType::CityAccommodation => "city-accommodation",
            DataType::BankAccountDonation => "bank-account-donation",
            DataType::CreditCardDonation => "credit-card-donation",
            DataType::InternationalBankAccountDonation => "international-bank-account-donation",
            DataType::InternationalUrlDonation => "international-url-donation",
            DataType::GatheringList => "gathering-list",
            DataType::HelpItemList => "help-item-list",
            DataType::UrlDonation => "url-donation",
            DataType::SmsDonation => "sms-donation",
        }
    }

    /// The leaf view registered for this tag.
    ///
    /// Bank and URL donations have a domestic and an international tag that
    /// intentionally resolve to the same view.
    pub const fn view(self) -> ViewKind {
        match self {
            DataType::CityAccommodation => ViewKind::CityAccommodation,
            DataType::BankAccountDonation | DataType::InternationalBankAccountDonation => {
                ViewKind::BankData
            }
            DataType::CreditCardDonation => ViewKind::CreditCardData,
            DataType::InternationalUrlDonation | DataType::UrlDonation => ViewKind::UrlData,
            DataType::GatheringList => ViewKind::GatheringData,
            DataType::HelpItemList => ViewKind::HelpItemData,
            DataType::SmsDonation => ViewKind::SmsData,
        }
    }
}

/// Resolve a raw tag by scanning [`DataType::ALL`] in priority order.
///
/// Returns `None` for anything that is not one of the nine tags, including
/// the empty string.
pub fn resolve_tag(tag: &str) -> Option<DataType> {
    DataType::ALL.iter().copied().find(|t| t.as_str() == tag)
}

impl FromStr for DataType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        resolve_tag(s).ok_or_else(|| DomainError::UnknownDataType(s.to_string()))
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl ViewKind {
    pub const fn name(self) -> &'static str {
        match self {
            ViewKind::CityAccommodation => "CityAccommodation",
            ViewKind::BankData => "BankData",
            ViewKind::CreditCardData => "CreditCardData",
            ViewKind::UrlData => "URLData",
            ViewKind::GatheringData => "GatheringData",
            ViewKind::HelpItemData => "HelpItemData",
            ViewKind::SmsData => "SMSData",
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_every_tag_when_parsing_its_wire_name_then_returns_same_tag() {
        for tag in DataType::ALL {
            assert_eq!(tag.as_str().parse::<DataType>(), Ok(tag));
            assert_eq!(tag.to_string(), tag.as_str());
        }
    }

    #[test]
    fn given_unknown_tag_when_parsing_then_returns_unknown_data_type() {
        assert_eq!(
            "crypto-donation".parse::<DataType>(),
            Err(DomainError::UnknownDataType("crypto-donation".into()))
        );
        assert_eq!(resolve_tag(""), None);
        assert_eq!(resolve_tag("URL-DONATION"), None);
    }

    #[test]
    fn test_priority_order_matches_dispatch_chain() {
        let names: Vec<&str> = DataType::ALL.iter().map(|t| t.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "city-accommodation",
                "bank-account-donation",
                "credit-card-donation",
                "international-bank-account-donation",
                "international-url-donation",
                "gathering-list",
                "help-item-list",
                "url-donation",
                "sms-donation",
            ]
        );
    }

    #[test]
    fn test_aliased_tags_share_a_view() {
        assert_eq!(
            DataType::BankAccountDonation.view(),
            DataType::InternationalBankAccountDonation.view()
        );
        assert_eq!(
            DataType::UrlDonation.view(),
            DataType::InternationalUrlDonation.view()
        );
        assert_ne!(DataType::UrlDonation.view(), DataType::BankAccountDonation.view());
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&DataType::InternationalUrlDonation).unwrap();
        assert_eq!(json, "\"international-url-donation\"");
    }
}
