//! Data leaf dispatch
//!
//! Selects the leaf view registered for a node's `dataType` and wraps the
//! result in a centered stack.

use crate::domain::entities::{
    BankAccounts, CityAccommodation, CreditCardDonation, DataNode, DataValue, GatheringList,
    HelpItemList, SmsDonation, UrlDonation,
};
use crate::domain::view::View;

/// Leaf view collaborators, one per [`ViewKind`](crate::domain::ViewKind).
///
/// Each method receives the payload exactly as it was loaded and must be a
/// pure function of it.
pub trait LeafViews {
    fn city_accommodation(&self, value: &CityAccommodation) -> View;
    fn bank_data(&self, value: &BankAccounts) -> View;
    fn credit_card_data(&self, value: &CreditCardDonation) -> View;
    fn url_data(&self, value: &UrlDonation) -> View;
    fn gathering_data(&self, value: &GatheringList) -> View;
    fn help_item_data(&self, value: &HelpItemList) -> View;
    fn sms_data(&self, value: &SmsDonation) -> View;
}

/// Render one data leaf.
///
/// Unrecognized payloads render as [`View::Empty`]; this is not an error.
/// The outer centered stack is always present, including for the empty case.
pub fn render_data<L>(node: &DataNode, leaves: &L) -> View
where
    L: LeafViews + ?Sized,
{
    let selected = match &node.data {
        DataValue::CityAccommodation(v) => leaves.city_accommodation(v),
        DataValue::BankAccountDonation(v) | DataValue::InternationalBankAccountDonation(v) => {
            leaves.bank_data(v)
        }
        DataValue::CreditCardDonation(v) => leaves.credit_card_data(v),
        DataValue::InternationalUrlDonation(v) | DataValue::UrlDonation(v) => leaves.url_data(v),
        DataValue::GatheringList(v) => leaves.gathering_data(v),
        DataValue::HelpItemList(v) => leaves.help_item_data(v),
        DataValue::SmsDonation(v) => leaves.sms_data(v),
        DataValue::Unrecognized { .. } => View::Empty,
    };
    View::centered(selected)
}
