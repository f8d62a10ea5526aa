//! Builders for synthetic snapshots used by the derivation tests.

use crate::snapshot::{DocumentKey, DocumentSnapshot, Element};

pub fn finance_stats(values: &[(&str, &str)]) -> Element {
    Element::new("financeStats").with_children(values.iter().map(|(k, v)| Element::new(*k).with_text(*v)))
}

pub fn server_vehicle(attrs: &[(&str, &str)]) -> Element {
    attrs.iter().fold(Element::new("Vehicle"), |e, (k, v)| e.with_attr(*k, *v))
}

pub fn loaded_object(attrs: &[(&str, &str)], nodes: &[(&str, &str)]) -> Element {
    let element = attrs.iter().fold(Element::new("onCreateLoadedObject"), |e, (k, v)| e.with_attr(*k, *v));
    element.with_children(
        nodes
            .iter()
            .map(|(fill_type, fill_level)| Element::new("node").with_attr("fillType", *fill_type).with_attr("fillLevel", *fill_level)),
    )
}

/// Builds a snapshot in which every derivation succeeds unless a test removes something.
#[derive(Debug)]
pub struct SnapshotBuilder {
    statistics: Vec<(String, String)>,
    finance_history: Vec<Element>,
    loaded_objects: Vec<Element>,
    server_money: Option<String>,
    players: Option<String>,
    server_vehicles: Option<Vec<Element>>,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self {
            statistics: [
                ("loan", "1000"),
                ("loanAnnualInterestRate", "3"),
                ("breedCowsCount", "4"),
                ("playTime", "600"),
                ("baleCount", "9"),
            ]
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect(),
            finance_history: vec![finance_stats(&[
                ("wagePayment", "100"),
                ("harvestIncome", "50"),
                ("vehicleLeasingCost", "10"),
                ("soldBales", "2"),
            ])],
            loaded_objects: Vec::new(),
            server_money: Some("1000".to_string()),
            players: Some("2".to_string()),
            server_vehicles: Some(Vec::new()),
        }
    }

    pub fn statistics(mut self, values: &[(&str, &str)]) -> Self {
        for (name, value) in values {
            if let Some(existing) = self.statistics.iter_mut().find(|(k, _)| k == name) {
                existing.1 = (*value).to_string();
            } else {
                self.statistics.push(((*name).to_string(), (*value).to_string()));
            }
        }
        self
    }

    pub fn without_statistic(mut self, name: &str) -> Self {
        self.statistics.retain(|(k, _)| k != name);
        self
    }

    pub fn finance_history(mut self, entries: &[Element]) -> Self {
        self.finance_history = entries.to_vec();
        self
    }

    pub fn loaded_objects(mut self, objects: Vec<Element>) -> Self {
        self.loaded_objects = objects;
        self
    }

    pub fn server_money(mut self, money: &str) -> Self {
        self.server_money = Some(money.to_string());
        self
    }

    pub fn without_server_money(mut self) -> Self {
        self.server_money = None;
        self
    }

    pub fn players(mut self, players: &str) -> Self {
        self.players = Some(players.to_string());
        self
    }

    pub fn without_slots(mut self) -> Self {
        self.players = None;
        self
    }

    pub fn server_vehicles(mut self, vehicles: Vec<Element>) -> Self {
        self.server_vehicles = Some(vehicles);
        self
    }

    pub fn without_server_vehicles(mut self) -> Self {
        self.server_vehicles = None;
        self
    }

    pub fn build(self) -> DocumentSnapshot {
        let statistics = Element::new("statistics").with_children(self.statistics.iter().map(|(k, v)| Element::new(k).with_text(v)));
        let career = Element::new("careerSavegame").with_child(statistics);

        let economy = Element::new("economy").with_child(Element::new("financeStatsHistory").with_children(self.finance_history));

        let vehicles = Element::new("careerVehicles").with_children(self.loaded_objects);

        let mut server = Element::new("Server").with_attr("game", "Farming Simulator");
        if let Some(money) = self.server_money {
            server = server.with_attr("money", money);
        }
        if let Some(players) = self.players {
            server = server.with_child(Element::new("Slots").with_attr("capacity", "16").with_attr("numUsed", players));
        }
        if let Some(list) = self.server_vehicles {
            server = server.with_child(Element::new("Vehicles").with_children(list));
        }

        DocumentSnapshot::from_documents([
            (DocumentKey::CareerSavegame, career),
            (DocumentKey::Economy, economy),
            (DocumentKey::Vehicles, vehicles),
            (DocumentKey::Server, server),
        ])
    }
}
