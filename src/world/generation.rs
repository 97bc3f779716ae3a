//! World generation

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::core::config::WorldConfig;
use crate::core::types::NationId;
use crate::world::nation::{Industry, IndustryType, Nation, Resources};
use crate::world::state::GameState;

/// Largest world the name list supports
pub const MAX_NATIONS: usize = 10;

/// Nations are placed at least this far from the map edge
pub const MAP_MARGIN: f64 = 50.0;

const NATION_NAMES: [&str; MAX_NATIONS] = [
    "Nordland", "Terranova", "Zenithia", "Aqualis", "Solaria",
    "Erebus", "Luminos", "Australix", "Borealis", "Meridian",
];

const TRAITS: [&str; 12] = [
    "industrial_hub", "tech_leader", "oil_rich", "eco_friendly",
    "high_population", "island_nation", "solar_potential", "mining_power",
    "agricultural_giant", "democratic", "authoritarian", "temperate_climate",
];

/// Generate a fresh world; the first nation belongs to the player
pub fn generate_world<R: Rng + ?Sized>(config: &WorldConfig, rng: &mut R) -> GameState {
    let count = config.nation_count.clamp(1, MAX_NATIONS);
    let mut nations: Vec<Nation> = (0..count)
        .map(|i| generate_nation(NATION_NAMES[i], i == 0, config, rng))
        .collect();

    initialize_relations(&mut nations, rng);

    let player = nations[0].id.clone();
    debug!(nations = nations.len(), player = %player, "generated world");

    GameState::new(nations, player, config.start_year)
}

fn generate_nation<R: Rng + ?Sized>(name: &str, is_player: bool, config: &WorldConfig, rng: &mut R) -> Nation {
    let mut nation = Nation::new(nation_id_for(name), name);
    nation.is_player = is_player;
    nation.x = rng.gen_range(MAP_MARGIN..config.map_width - MAP_MARGIN);
    nation.y = rng.gen_range(MAP_MARGIN..config.map_height - MAP_MARGIN);
    nation.gdp = rng.gen_range(500_000..2_500_000) as f64;
    nation.population = rng.gen_range(20_000_000..100_000_000);
    nation.tech_level = rng.gen_range(2..5) as f64;
    nation.pollution = rng.gen_range(50..250) as f64;
    nation.stability = rng.gen_range(50..90) as f64;
    nation.resources = Resources::new(
        rng.gen_range(1_000..6_000) as f64,
        rng.gen_range(500..5_500) as f64,
        rng.gen_range(100..1_600) as f64,
        rng.gen_range(4_000..12_000) as f64,
        rng.gen_range(1_000..6_000) as f64,
    );
    nation.industries = generate_industries(rng);
    nation.traits = select_traits(rng);
    nation
}

fn nation_id_for(name: &str) -> String {
    name.to_lowercase().replace(char::is_whitespace, "_")
}

/// Two to four distinct industries
fn generate_industries<R: Rng + ?Sized>(rng: &mut R) -> Vec<Industry> {
    let count = rng.gen_range(2..=4);
    IndustryType::KNOWN
        .choose_multiple(rng, count)
        .map(|industry_type| Industry {
            industry_type: industry_type.clone(),
            level: rng.gen_range(1..=3),
            output: rng.gen_range(500..2_000) as f64,
        })
        .collect()
}

fn select_traits<R: Rng + ?Sized>(rng: &mut R) -> Vec<String> {
    let count = rng.gen_range(2..=3);
    TRAITS
        .choose_multiple(rng, count)
        .map(|t| t.to_string())
        .collect()
}

/// Give every nation a relation toward every other
fn initialize_relations<R: Rng + ?Sized>(nations: &mut [Nation], rng: &mut R) {
    let ids: Vec<NationId> = nations.iter().map(|n| n.id.clone()).collect();

    for nation in nations.iter_mut() {
        for other in &ids {
            if other != &nation.id {
                nation.relations.insert(other.clone(), rng.gen_range(20..80) as f64);
            }
        }
    }
}
