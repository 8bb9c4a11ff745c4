//! Integration tests for writing and reading whole packs.
//!
//! These tests verify:
//! - Every resource kind survives write → read unchanged
//! - Path collisions between typed resources and extra files are fatal
//! - Custom metadata parts round-trip when their codec is registered, and
//!   never break the read when it is not
//! - Lenient reads keep going past broken files
//!
//! Run with: `cargo test --test pack_roundtrip`

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use bytes::Bytes;
use serde_json::{json, Value};

use packsmith::codec::{self, CodecError, Vector2Float, Vector3Float};
use packsmith::metadata::{
    AnimationFrame, AnimationMeta, FilterMeta, FilterPattern, LanguageEntry, Metadata, PartCodecs,
    PartData, PartTag, SodiumMeta, UnknownParts, VillagerHat, VillagerMeta,
};
use packsmith::resource::{
    BlockState, Font, FontProvider, GuiLight, ItemTransform, Language, Model, SoundEntry,
    SoundEntryType, SoundEvent, SoundFile, SoundRegistry, Text, Texture,
};
use packsmith::{
    read_pack, write_pack, ByteSource, Identifier, PackError, ReadOptions, ResourcePack,
    WriteOptions,
};

// ============================================================================
// Helper Functions
// ============================================================================

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn id(text: &str) -> Identifier {
    Identifier::parse(text).unwrap()
}

/// A pack with at least one resource of every kind and several metadata
/// parts.
fn full_pack() -> ResourcePack {
    let mut pack = ResourcePack::new();

    pack.set_icon(vec![0x89u8, b'P', b'N', b'G'])
        .pack_meta(15, "Everything pack")
        .filter(FilterMeta::new(vec![
            FilterPattern::new(Some("minecraft"), Some("textures/entity/.*")).unwrap(),
        ]))
        .language_entry("tlh_aa", LanguageEntry::new("Klingon", "Qo'noS", false))
        .metadata_part(SodiumMeta::new(vec!["clouds".to_string()]));

    pack.block_state(
        BlockState::new(id("oak_log"))
            .with_variant("axis=y", json!({"model": "block/oak_log"}))
            .with_variant("axis=x", json!({"model": "block/oak_log_horizontal", "x": 90})),
    )
    .block_state(
        BlockState::new(id("custom:fence"))
            .with_part(json!({"apply": {"model": "custom:block/fence_post"}})),
    );

    pack.font(Font::new(
        id("default"),
        vec![FontProvider::bitmap(
            id("font/ascii.png"),
            7,
            vec!["abc".to_string()],
        )],
    ))
    .font_provider(
        id("default"),
        FontProvider::TrueType {
            file: id("custom:ui.ttf"),
            shift: Vector2Float::new(0.5, -1.25),
            size: 9.5,
            oversample: 2.0,
            skip: vec![],
        },
    );

    pack.language(
        Language::new(id("en_us"))
            .with("menu.quit", "Leave")
            .with("block.custom.fence", "Fancy Fence"),
    );

    let mut model = Model::new(id("item/wand"))
        .with_parent(id("item/handheld"))
        .with_texture("layer0", "custom:item/wand")
        .with_display(
            "thirdperson_righthand",
            ItemTransform {
                rotation: Vector3Float::new(0.0, -90.0, 55.0),
                translation: Vector3Float::new(0.0, 4.0, 0.5),
                scale: Vector3Float::new(0.85, 0.85, 0.85),
            },
        );
    model.gui_light = Some(GuiLight::Front);
    model.ambient_occlusion = false;
    pack.model(model);

    let mut loud = SoundEntry::new(id("custom:ambient/wind"));
    loud.volume = 0.1;
    loud.pitch = 1.3;
    loud.weight = 3;
    loud.attenuation_distance = 32;
    loud.preload = true;
    let mut nested = SoundEntry::new(id("custom:ambient.gust"));
    nested.kind = SoundEntryType::Event;

    pack.sound_registry(SoundRegistry::new("custom").unwrap().with_event(
        "ambient.wind",
        SoundEvent {
            replace: true,
            subtitle: Some("subtitles.ambient.wind".to_string()),
            sounds: vec![loud, nested],
        },
    ))
    .sound_event(
        &id("custom:ambient.gust"),
        SoundEvent::new(vec![SoundEntry::new(id("custom:ambient/gust"))]),
    )
    .sound(SoundFile::new(id("custom:ambient/wind"), vec![1u8, 2, 3]));

    let animation = AnimationMeta {
        interpolate: true,
        frame_time: 2,
        frames: vec![AnimationFrame::new(0), AnimationFrame::timed(1, 5)],
        ..AnimationMeta::default()
    };
    pack.texture(
        Texture::new(id("block/lava_still"), vec![7u8; 16]).with_meta(Metadata::new().with(animation)),
    )
    .texture(Texture::new(id("entity/villager/profession/farmer"), vec![8u8; 4]).with_meta(
        Metadata::new().with(VillagerMeta {
            hat: VillagerHat::Partial,
        }),
    ))
    .texture(Texture::new(id("item/wand"), vec![9u8; 4]));

    pack.text(Text::new(id("splashes"), "Hello!\nAlso try the end poem"));

    pack.file("assets/custom/shaders/core/glint.vsh", "void main() {}")
        .unwrap()
        .file("credits.txt", "made by hand")
        .unwrap();

    pack
}

// ============================================================================
// Round Trips
// ============================================================================

#[test]
fn test_full_pack_roundtrip() {
    init_tracing();
    let pack = full_pack();

    let tree = write_pack(&pack, &WriteOptions::default()).unwrap();
    let outcome = read_pack(&tree, &ReadOptions::default()).unwrap();

    assert!(outcome.is_complete());
    assert_eq!(outcome.pack.block_states(), pack.block_states());
    assert_eq!(outcome.pack.fonts(), pack.fonts());
    assert_eq!(outcome.pack.languages(), pack.languages());
    assert_eq!(outcome.pack.models(), pack.models());
    assert_eq!(outcome.pack.sound_registries(), pack.sound_registries());
    assert_eq!(outcome.pack.sounds(), pack.sounds());
    assert_eq!(outcome.pack.textures(), pack.textures());
    assert_eq!(outcome.pack.texts(), pack.texts());
    assert_eq!(outcome.pack.meta(), pack.meta());
    assert_eq!(outcome.pack.extra_files(), pack.extra_files());
    assert_eq!(outcome.pack, pack);
}

#[test]
fn test_pretty_and_compact_read_back_equal() {
    let pack = full_pack();
    let compact = write_pack(&pack, &WriteOptions::default()).unwrap();
    let pretty = write_pack(&pack, &WriteOptions::default().with_pretty_json(true)).unwrap();

    assert_ne!(compact.digest(), pretty.digest());
    assert_eq!(
        read_pack(&compact, &ReadOptions::default()).unwrap().pack,
        read_pack(&pretty, &ReadOptions::default()).unwrap().pack
    );
}

#[test]
fn test_second_write_of_read_pack_is_identical() {
    let first = write_pack(&full_pack(), &WriteOptions::default()).unwrap();
    let reread = read_pack(&first, &ReadOptions::default()).unwrap().pack;
    let second = write_pack(&reread, &WriteOptions::default()).unwrap();

    assert_eq!(first.digest(), second.digest());
}

#[test]
fn test_expected_layout() {
    let tree = write_pack(&full_pack(), &WriteOptions::default()).unwrap();

    for path in [
        "pack.png",
        "pack.mcmeta",
        "assets/minecraft/blockstates/oak_log.json",
        "assets/custom/blockstates/fence.json",
        "assets/minecraft/font/default.json",
        "assets/minecraft/lang/en_us.json",
        "assets/minecraft/models/item/wand.json",
        "assets/custom/sounds.json",
        "assets/custom/sounds/ambient/wind.ogg",
        "assets/minecraft/textures/block/lava_still.png",
        "assets/minecraft/textures/block/lava_still.png.mcmeta",
        "assets/minecraft/textures/item/wand.png",
        "assets/minecraft/texts/splashes.txt",
        "assets/custom/shaders/core/glint.vsh",
        "credits.txt",
    ] {
        assert!(tree.contains(path), "missing {}", path);
    }
    assert!(!tree.contains("assets/minecraft/textures/item/wand.png.mcmeta"));

    let meta = codec::parse_slice(&tree.get("pack.mcmeta").unwrap().bytes()).unwrap();
    let properties: Vec<&String> = meta.as_object().unwrap().keys().collect();
    assert_eq!(properties, vec!["filter", "language", "pack", "sodium"]);
    assert_eq!(meta["pack"], json!({"pack_format": 15, "description": "Everything pack"}));

    let sounds = codec::parse_slice(&tree.get("assets/custom/sounds.json").unwrap().bytes()).unwrap();
    assert_eq!(sounds["ambient.gust"]["sounds"], json!(["custom:ambient/gust"]));
    assert_eq!(sounds["ambient.wind"]["sounds"][0]["volume"], json!(0.1));
}

#[test]
fn test_deferred_sources_are_written_and_reinvokable() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let source = ByteSource::deferred(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Bytes::from_static(b"OggS")
    });

    let mut pack = ResourcePack::new();
    pack.sound(SoundFile::new(id("custom:click"), source));

    let tree = write_pack(&pack, &WriteOptions::default()).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let data = tree.get("assets/custom/sounds/click.ogg").unwrap();
    assert_eq!(data.bytes().as_ref(), b"OggS");
    assert_eq!(data.bytes().as_ref(), b"OggS");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

// ============================================================================
// Collisions
// ============================================================================

#[test]
fn test_raw_file_at_typed_path_collides() {
    let mut pack = ResourcePack::new();
    pack.texture(Texture::new(id("block/stone"), vec![1u8]));
    pack.file("assets/minecraft/textures/block/stone.png", vec![2u8])
        .unwrap();

    match write_pack(&pack, &WriteOptions::default()) {
        Err(PackError::PathCollision {
            path,
            first,
            second,
        }) => {
            assert_eq!(path, "assets/minecraft/textures/block/stone.png");
            assert_eq!(first, "texture minecraft:block/stone");
            assert_eq!(second, "extra file assets/minecraft/textures/block/stone.png");
        }
        other => panic!("expected a path collision, got {:?}", other),
    }
}

#[test]
fn test_raw_file_at_metadata_path_collides() {
    let mut pack = ResourcePack::new();
    pack.pack_meta(15, "x");
    pack.file("pack.mcmeta", "{}").unwrap();

    let err = write_pack(&pack, &WriteOptions::default()).unwrap_err();
    assert!(err.to_string().contains("pack metadata"));
}

#[test]
fn test_same_identifier_different_kinds_do_not_collide() {
    let key = id("custom:thing");
    let mut pack = ResourcePack::new();
    pack.model(Model::new(key.clone()))
        .block_state(BlockState::new(key.clone()))
        .texture(Texture::new(key.clone(), vec![1u8]))
        .text(Text::new(key.clone(), "t"))
        .sound(SoundFile::new(key.clone(), vec![2u8]))
        .language(Language::new(key.clone()))
        .font(Font::new(key, vec![]));

    let tree = write_pack(&pack, &WriteOptions::default()).unwrap();
    assert_eq!(tree.len(), 7);
}

#[test]
fn test_sound_registry_namespace_is_validated() {
    for namespace in ["..", "Custom", ""] {
        assert!(SoundRegistry::new(namespace).is_err());
    }
    assert!(Identifier::new("..", "ambient").is_err());
}

#[test]
fn test_sound_registry_with_dotted_namespace_roundtrips() {
    let chime = SoundEvent::new(vec![SoundEntry::new(id("my.pack:chime"))]);
    let mut pack = ResourcePack::new();
    pack.sound_registry(SoundRegistry::new("my.pack").unwrap().with_event("chime", chime));
    let tree = write_pack(&pack, &WriteOptions::default()).unwrap();
    assert!(tree.contains("assets/my.pack/sounds.json"));

    let outcome = read_pack(&tree, &ReadOptions::default()).unwrap();
    assert!(outcome.pack.extra_files().is_empty());
    assert_eq!(outcome.pack, pack);
}

// ============================================================================
// Metadata Extensibility
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
struct Credits {
    authors: Vec<String>,
    year: i32,
}

impl PartData for Credits {
    const PROPERTY: &'static str = "credits";

    fn examine(&self) -> Vec<(&'static str, String)> {
        vec![
            ("authors", self.authors.join(", ")),
            ("year", self.year.to_string()),
        ]
    }

    fn encode(&self) -> Result<Value, CodecError> {
        Ok(json!({"authors": self.authors, "year": self.year}))
    }

    fn decode(value: &Value) -> Result<Self, CodecError> {
        let object = codec::as_object(value, "credits")?;
        Ok(Self {
            authors: codec::get_string_list(object, "authors")?,
            year: codec::get_int(object, "year", 0)?,
        })
    }
}

fn credited_pack() -> ResourcePack {
    let mut pack = ResourcePack::new();
    pack.pack_meta(15, "credited").metadata_part(Credits {
        authors: vec!["ana".to_string(), "bo".to_string()],
        year: 2024,
    });
    pack
}

#[test]
fn test_custom_part_roundtrips_with_registered_codec() {
    let pack = credited_pack();
    let tree = write_pack(&pack, &WriteOptions::default()).unwrap();

    let options = ReadOptions::default().with_part::<Credits>();
    let outcome = read_pack(&tree, &options).unwrap();

    assert_eq!(outcome.pack.meta().get::<Credits>(), pack.meta().get::<Credits>());
    assert_eq!(outcome.pack, pack);
}

#[test]
fn test_custom_part_without_codec_does_not_fail_read() {
    init_tracing();
    let tree = write_pack(&credited_pack(), &WriteOptions::default()).unwrap();

    let preserved = read_pack(&tree, &ReadOptions::default()).unwrap();
    assert!(preserved.is_complete());
    assert_eq!(preserved.pack.format(), 15);
    assert!(preserved.pack.meta().get::<Credits>().is_none());
    assert!(preserved
        .pack
        .meta()
        .get_tag(&PartTag::Opaque("credits".to_string()))
        .is_some());

    // Writing the preserved part back reproduces the original document.
    let rewritten = write_pack(&preserved.pack, &WriteOptions::default()).unwrap();
    assert_eq!(rewritten.get("pack.mcmeta"), tree.get("pack.mcmeta"));

    let dropped = read_pack(
        &tree,
        &ReadOptions::default().with_unknown_parts(UnknownParts::Drop),
    )
    .unwrap();
    assert_eq!(dropped.pack.meta().len(), 1);
}

#[test]
fn test_typed_part_replaces_part_preserved_without_codec() {
    let tree = write_pack(&credited_pack(), &WriteOptions::default()).unwrap();
    let mut pack = read_pack(&tree, &ReadOptions::default()).unwrap().pack;

    pack.metadata_part(Credits {
        authors: vec!["cy".to_string()],
        year: 2025,
    });
    assert_eq!(pack.meta().len(), 2);

    let rewritten = write_pack(&pack, &WriteOptions::default()).unwrap();
    let options = ReadOptions::default().with_part::<Credits>();
    let outcome = read_pack(&rewritten, &options).unwrap();
    assert_eq!(outcome.pack.meta().get::<Credits>().unwrap().year, 2025);
    assert_eq!(outcome.pack, pack);
}

#[test]
fn test_reader_with_no_codecs_keeps_everything_opaque() {
    let mut pack = ResourcePack::new();
    pack.pack_meta(15, "x");
    let tree = write_pack(&pack, &WriteOptions::default()).unwrap();

    let options = ReadOptions::default().with_codecs(PartCodecs::empty());
    let outcome = read_pack(&tree, &options).unwrap();

    assert_eq!(outcome.pack.format(), packsmith::NO_FORMAT);
    assert_eq!(outcome.pack.meta().len(), 1);
}

// ============================================================================
// Lenient Reads
// ============================================================================

#[test]
fn test_lenient_read_collects_every_failure() {
    init_tracing();
    let mut tree = write_pack(&full_pack(), &WriteOptions::default()).unwrap();
    tree.insert("assets/minecraft/models/broken.json", "{\"parent\": 5}");
    tree.insert("assets/minecraft/lang/fr_fr.json", "not json");
    tree.insert("assets/minecraft/texts/bad.txt", vec![0xffu8, 0xfe]);

    let strict = read_pack(&tree, &ReadOptions::default());
    assert!(matches!(strict, Err(PackError::ResourceDecode { .. })));

    let outcome = read_pack(&tree, &ReadOptions::lenient()).unwrap();
    let mut failed: Vec<&str> = outcome.failures.iter().filter_map(|e| e.path()).collect();
    failed.sort_unstable();
    assert_eq!(
        failed,
        vec![
            "assets/minecraft/lang/fr_fr.json",
            "assets/minecraft/models/broken.json",
            "assets/minecraft/texts/bad.txt",
        ]
    );

    // The healthy parts of the pack are intact.
    assert_eq!(outcome.pack.models().len(), 1);
    assert_eq!(outcome.pack.languages().len(), 1);
    for path in failed {
        assert!(outcome.pack.extra_files().contains_key(path));
    }
}

#[test]
fn test_broken_texture_metadata_in_lenient_mode() {
    let mut tree = packsmith::FileTree::new();
    tree.insert("assets/minecraft/textures/block/a.png", vec![1u8]);
    tree.insert("assets/minecraft/textures/block/a.png.mcmeta", "{\"animation\": []}");

    let outcome = read_pack(&tree, &ReadOptions::lenient()).unwrap();
    assert_eq!(outcome.failures.len(), 1);
    let texture = outcome.pack.textures().get(&id("block/a")).unwrap();
    assert!(!texture.has_meta());
    assert!(outcome
        .pack
        .extra_files()
        .contains_key("assets/minecraft/textures/block/a.png.mcmeta"));
}
