use offsetcore::model::{
    Company, EsgManager, FuelMix, PlantStatus, PlantType, PowerPlant, UsagePattern,
};

#[allow(clippy::too_many_arguments)]
fn plant(
    id: &str,
    name: &str,
    plant_type: PlantType,
    capacity: f64,
    location: &str,
    load: f64,
    efficiency: f64,
    fuel_mix: FuelMix,
    emission_factor: f64,
) -> PowerPlant {
    PowerPlant {
        id: id.to_string(),
        name: name.to_string(),
        plant_type,
        capacity,
        location: location.to_string(),
        current_output: capacity * load,
        efficiency,
        fuel_mix,
        emission_factor,
        status: PlantStatus::Operating,
    }
}

fn coal_mix(coal: f64, ammonia: f64) -> FuelMix {
    FuelMix {
        coal: Some(coal),
        ammonia: (ammonia > 0.0).then_some(ammonia),
        ..Default::default()
    }
}

/// Plants matching the generator's baseline table.
pub fn default_plants() -> Vec<PowerPlant> {
    vec![
        plant(
            "pp_boryeong_1",
            "Boryeong Unit 1",
            PlantType::Coal,
            500.0,
            "Boryeong, South Chungcheong",
            0.85,
            38.5,
            coal_mix(95.0, 5.0),
            0.95,
        ),
        plant(
            "pp_boryeong_2",
            "Boryeong Unit 2",
            PlantType::Coal,
            500.0,
            "Boryeong, South Chungcheong",
            0.82,
            37.8,
            coal_mix(100.0, 0.0),
            0.98,
        ),
        plant(
            "pp_dangjin_1",
            "Dangjin Unit 1",
            PlantType::Coal,
            1000.0,
            "Dangjin, South Chungcheong",
            0.9,
            40.1,
            coal_mix(90.0, 10.0),
            0.92,
        ),
        plant(
            "pp_taean_1",
            "Taean Unit 1",
            PlantType::Coal,
            700.0,
            "Taean, South Chungcheong",
            0.78,
            39.2,
            coal_mix(97.0, 3.0),
            0.94,
        ),
        plant(
            "pp_seocheon_gas",
            "Seocheon Combined Cycle",
            PlantType::Lng,
            900.0,
            "Seocheon, South Chungcheong",
            0.6,
            55.0,
            FuelMix {
                lng: Some(100.0),
                ..Default::default()
            },
            0.35,
        ),
        plant(
            "pp_solar_farm_1",
            "Saemangeum Solar Farm",
            PlantType::Renewable,
            300.0,
            "Gunsan, North Jeolla",
            0.4,
            21.0,
            FuelMix {
                renewable: Some(100.0),
                ..Default::default()
            },
            0.02,
        ),
    ]
}

fn company(
    id: &str,
    name: &str,
    business_type: &str,
    usage: f64,
    target: f64,
    re100: bool,
) -> Company {
    Company {
        id: id.to_string(),
        name: name.to_string(),
        business_type: business_type.to_string(),
        annual_electricity_usage: usage,
        carbon_reduction_target: target,
        re100_participant: re100,
        usage_pattern: UsagePattern {
            peak_hours: vec!["09:00-12:00".into(), "14:00-18:00".into()],
            base_load: usage / 8760.0 * 0.6,
            peak_load: usage / 8760.0 * 1.4,
        },
        esg_manager: EsgManager {
            name: "ESG Office".into(),
            email: format!("esg@{}.example.com", id.trim_start_matches("comp_")),
        },
    }
}

pub fn default_companies() -> Vec<Company> {
    vec![
        company("comp_samsung", "Samsung Electronics", "semiconductor", 25_000.0, 30.0, true),
        company("comp_skhynix", "SK hynix", "semiconductor", 12_000.0, 25.0, true),
        company("comp_hyundai", "Hyundai Motor", "automotive", 3_500.0, 20.0, false),
    ]
}
