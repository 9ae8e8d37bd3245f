use std::fmt;

/// Unique identifier for a block type
///
/// Level files store one byte per voxel, so ids are 8-bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct BlockId(pub u8);

// Safe because BlockId is just a u8
unsafe impl bytemuck::Pod for BlockId {}
unsafe impl bytemuck::Zeroable for BlockId {}

impl Default for BlockId {
    fn default() -> Self {
        BlockId::AIR
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Display block name if it's a known block
        match *self {
            BlockId::AIR => write!(f, "Air"),
            BlockId::STONE => write!(f, "Stone"),
            BlockId::GRASS => write!(f, "Grass"),
            BlockId::DIRT => write!(f, "Dirt"),
            BlockId::COBBLESTONE => write!(f, "Cobblestone"),
            BlockId::PLANKS => write!(f, "Planks"),
            BlockId::SAPLING => write!(f, "Sapling"),
            BlockId::BEDROCK => write!(f, "Bedrock"),
            BlockId::FLOWING_WATER => write!(f, "Flowing Water"),
            BlockId::WATER => write!(f, "Water"),
            BlockId::FLOWING_LAVA => write!(f, "Flowing Lava"),
            BlockId::LAVA => write!(f, "Lava"),
            BlockId::SAND => write!(f, "Sand"),
            BlockId::GRAVEL => write!(f, "Gravel"),
            BlockId::GOLD_ORE => write!(f, "Gold Ore"),
            BlockId::IRON_ORE => write!(f, "Iron Ore"),
            BlockId::COAL_ORE => write!(f, "Coal Ore"),
            BlockId::LOG => write!(f, "Log"),
            BlockId::LEAVES => write!(f, "Leaves"),
            BlockId::SPONGE => write!(f, "Sponge"),
            BlockId::GLASS => write!(f, "Glass"),
            BlockId::BRICK => write!(f, "Brick"),
            BlockId::TNT => write!(f, "TNT"),
            BlockId::BOOKSHELF => write!(f, "Bookshelf"),
            BlockId::MOSSY_COBBLESTONE => write!(f, "Mossy Cobblestone"),
            BlockId::OBSIDIAN => write!(f, "Obsidian"),
            _ => write!(f, "Block({})", self.0),
        }
    }
}

impl BlockId {
    pub const AIR: BlockId = BlockId(0);
    pub const STONE: BlockId = BlockId(1);
    pub const GRASS: BlockId = BlockId(2);
    pub const DIRT: BlockId = BlockId(3);
    pub const COBBLESTONE: BlockId = BlockId(4);
    pub const PLANKS: BlockId = BlockId(5);
    pub const SAPLING: BlockId = BlockId(6);
    pub const BEDROCK: BlockId = BlockId(7);
    pub const FLOWING_WATER: BlockId = BlockId(8);
    pub const WATER: BlockId = BlockId(9);
    pub const FLOWING_LAVA: BlockId = BlockId(10);
    pub const LAVA: BlockId = BlockId(11);
    pub const SAND: BlockId = BlockId(12);
    pub const GRAVEL: BlockId = BlockId(13);
    pub const GOLD_ORE: BlockId = BlockId(14);
    pub const IRON_ORE: BlockId = BlockId(15);
    pub const COAL_ORE: BlockId = BlockId(16);
    pub const LOG: BlockId = BlockId(17);
    pub const LEAVES: BlockId = BlockId(18);
    pub const SPONGE: BlockId = BlockId(19);
    pub const GLASS: BlockId = BlockId(20);
    pub const BRICK: BlockId = BlockId(45);
    pub const TNT: BlockId = BlockId(46);
    pub const BOOKSHELF: BlockId = BlockId(47);
    pub const MOSSY_COBBLESTONE: BlockId = BlockId(48);
    pub const OBSIDIAN: BlockId = BlockId(49);

    /// Create a new BlockId from a raw u8 value
    pub const fn new(id: u8) -> Self {
        BlockId(id)
    }
}
