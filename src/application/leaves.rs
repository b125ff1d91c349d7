//! Standard leaf views
//!
//! Builds a [`View`] for each payload kind, with table layouts following the
//! Markdown exporter of the guide data.

use crate::application::cells::{host_of, link_or_text, normalize_cell, phone_or_text};
use crate::config::Labels;
use crate::domain::{
    BankAccount, BankAccounts, CityAccommodation, CreditCardDonation, GatheringList,
    HelpItemList, LeafViews, SmsDonation, UrlDonation, View,
};

#[derive(Debug, Clone, Default)]
pub struct StandardLeaves {
    labels: Labels,
}

impl StandardLeaves {
    pub fn new(labels: Labels) -> Self {
        Self { labels }
    }

    fn account(&self, account: &BankAccount) -> View {
        let l = &self.labels;
        let optional = [
            (&l.owner, &account.owner_name),
            (&l.eur, &account.eur),
            (&l.usd, &account.usd),
            (&l.gbp, &account.gbp),
            (&l.swift, &account.swift),
        ];

        let mut children = vec![
            View::heading(normalize_cell(&account.name)),
            View::field(&l.branch, normalize_cell(&account.branch)),
            View::field(&l.local_currency, normalize_cell(&account.tl)),
        ];
        children.extend(optional.into_iter().filter_map(|(label, value)| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| View::field(label, normalize_cell(v)))
        }));
        View::stack(children)
    }
}

impl LeafViews for StandardLeaves {
    fn city_accommodation(&self, value: &CityAccommodation) -> View {
        let l = &self.labels;
        let rows = value
            .items
            .iter()
            .map(|item| {
                let status = if item.is_validated {
                    &l.verified
                } else {
                    &l.unverified
                };
                vec![
                    View::text(normalize_cell(&item.name)),
                    phone_or_text(item.phone_number.as_deref()),
                    View::text(status),
                    link_or_text(&item.url, &l.source),
                ]
            })
            .collect();

        View::stack(vec![
            View::heading(normalize_cell(&value.city)),
            View::Table {
                headers: vec![l.name.clone(), l.phone.clone(), l.status.clone(), l.source.clone()],
                rows,
            },
        ])
    }

    fn bank_data(&self, value: &BankAccounts) -> View {
        View::stack(value.accounts.iter().map(|a| self.account(a)).collect())
    }

    fn credit_card_data(&self, value: &CreditCardDonation) -> View {
        View::stack(vec![
            View::heading(normalize_cell(&value.name)),
            link_or_text(&value.url, &self.labels.donate),
        ])
    }

    fn url_data(&self, value: &UrlDonation) -> View {
        let url = value.url.trim();
        match host_of(url) {
            Some(host) => View::link(host, url),
            None => View::text(normalize_cell(url)),
        }
    }

    fn gathering_data(&self, value: &GatheringList) -> View {
        View::stack(vec![
            View::heading(normalize_cell(&value.city)),
            View::List {
                items: value.items.iter().map(|i| normalize_cell(i)).collect(),
            },
        ])
    }

    fn help_item_data(&self, value: &HelpItemList) -> View {
        let l = &self.labels;
        let rows = value
            .items
            .iter()
            .map(|item| {
                vec![
                    View::text(normalize_cell(&item.name)),
                    View::text(normalize_cell(item.location.as_deref().unwrap_or(""))),
                    link_or_text(&item.url, &l.source_or_map),
                    phone_or_text(Some(item.phone_number.as_str())),
                ]
            })
            .collect();

        View::stack(vec![
            View::heading(normalize_cell(&value.city)),
            View::Table {
                headers: vec![
                    l.name.clone(),
                    l.location.clone(),
                    l.link.clone(),
                    l.phone.clone(),
                ],
                rows,
            },
        ])
    }

    fn sms_data(&self, value: &SmsDonation) -> View {
        let l = &self.labels;
        View::stack(vec![
            View::heading(normalize_cell(&value.name)),
            View::field(&l.sms, normalize_cell(&value.sms)),
            View::field(&l.number, normalize_cell(&value.number)),
            View::field(&l.amount, normalize_cell(&value.amount)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AccommodationItem, HelpItem};

    #[test]
    fn given_accommodation_items_when_rendering_then_builds_status_and_source_columns() {
        let value = CityAccommodation {
            city: "Adana".into(),
            items: vec![
                AccommodationItem {
                    name: "Spor\nSalonu".into(),
                    phone_number: Some("0322 111 22 33".into()),
                    url: "https://adana.bel.tr".into(),
                    is_validated: true,
                },
                AccommodationItem {
                    name: "Okul".into(),
                    phone_number: None,
                    url: "Belediye duyurusu".into(),
                    is_validated: false,
                },
            ],
        };

        let view = StandardLeaves::default().city_accommodation(&value);

        let View::Stack { children, .. } = view else {
            panic!("expected stack");
        };
        assert_eq!(children[0], View::heading("Adana"));
        let View::Table { headers, rows } = &children[1] else {
            panic!("expected table");
        };
        assert_eq!(headers, &vec!["Name", "Phone", "Status", "Source"]);
        assert_eq!(
            rows[0],
            vec![
                View::text("Spor - Salonu"),
                View::phone("0322 111 22 33"),
                View::text("Verified"),
                View::link("Source", "https://adana.bel.tr"),
            ]
        );
        assert_eq!(
            rows[1],
            vec![
                View::text("Okul"),
                View::text("-"),
                View::text("Unverified"),
                View::text("Belediye duyurusu"),
            ]
        );
    }

    #[test]
    fn given_account_without_optionals_when_rendering_then_only_required_fields() {
        let value = BankAccounts {
            accounts: vec![BankAccount {
                name: "Vakıfbank".into(),
                branch: "Ankara".into(),
                owner_name: None,
                tl: "TR00 0015".into(),
                eur: Some("TR00 0016".into()),
                usd: Some("  ".into()),
                gbp: None,
                swift: None,
            }],
        };

        let view = StandardLeaves::default().bank_data(&value);

        assert_eq!(
            view,
            View::stack(vec![View::stack(vec![
                View::heading("Vakıfbank"),
                View::field("Branch", "Ankara"),
                View::field("TL", "TR00 0015"),
                View::field("EUR", "TR00 0016"),
            ])])
        );
    }

    #[test]
    fn given_line_breaks_in_headings_and_fields_when_rendering_then_single_line_text() {
        let leaves = StandardLeaves::default();
        let gathering = GatheringList {
            city: "Kahraman\nmaraş".into(),
            items: vec![],
        };
        let sms = SmsDonation {
            name: " AFAD\r\n".into(),
            sms: "DEPREM\tYARDIM".into(),
            number: "3840".into(),
            amount: "10 TL".into(),
        };

        let View::Stack { children, .. } = leaves.gathering_data(&gathering) else {
            panic!("expected stack");
        };
        assert_eq!(children[0], View::heading("Kahraman - maraş"));
        assert_eq!(
            leaves.sms_data(&sms),
            View::stack(vec![
                View::heading("AFAD"),
                View::field("SMS", "DEPREM - YARDIM"),
                View::field("Number", "3840"),
                View::field("Amount", "10 TL"),
            ])
        );
    }

    #[test]
    fn given_url_donation_when_rendering_then_labels_link_with_host() {
        let leaves = StandardLeaves::default();
        assert_eq!(
            leaves.url_data(&UrlDonation {
                url: "https://www.ahbap.org/bagis".into()
            }),
            View::link("www.ahbap.org", "https://www.ahbap.org/bagis")
        );
        assert_eq!(
            leaves.url_data(&UrlDonation {
                url: "ahbap.org".into()
            }),
            View::text("ahbap.org")
        );
    }

    #[test]
    fn given_help_items_when_rendering_then_location_placeholder_and_phone() {
        let value = HelpItemList {
            city: "Malatya".into(),
            items: vec![HelpItem {
                name: "Çadır dağıtımı".into(),
                location: None,
                url: "https://maps.example.org/p".into(),
                phone_number: "0422 000 00 00".into(),
            }],
        };

        let View::Stack { children, .. } = StandardLeaves::default().help_item_data(&value) else {
            panic!("expected stack");
        };
        let View::Table { rows, .. } = &children[1] else {
            panic!("expected table");
        };
        assert_eq!(
            rows[0],
            vec![
                View::text("Çadır dağıtımı"),
                View::text("-"),
                View::link("Source/Map", "https://maps.example.org/p"),
                View::phone("0422 000 00 00"),
            ]
        );
    }

    #[test]
    fn given_custom_labels_when_rendering_sms_then_uses_them() {
        let labels = Labels {
            number: "Numara".into(),
            amount: "Tutar".into(),
            ..Labels::default()
        };
        let view = StandardLeaves::new(labels).sms_data(&SmsDonation {
            name: "AFAD".into(),
            sms: "DEPREM".into(),
            number: "3840".into(),
            amount: "10 TL".into(),
        });
        assert_eq!(
            view,
            View::stack(vec![
                View::heading("AFAD"),
                View::field("SMS", "DEPREM"),
                View::field("Numara", "3840"),
                View::field("Tutar", "10 TL"),
            ])
        );
    }
}
