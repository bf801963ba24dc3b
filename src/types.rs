//! Core data types for SortVis-RS
//!
//! This module contains the fundamental data structures used throughout
//! the crate for describing one step of a sorting run.
//!
//! # Main Types
//!
//! - [`Algorithm`] - The sorting algorithms that can be stepped
//! - [`Step`] - One immutable, fully described frame of algorithm progress
//! - [`ArrayState`] - The array contents plus the indices a frame draws attention to
//! - [`StepAction`] - What happened in a step, with its index payload
//! - [`Operation`] - The action plus its description and complexity label
//! - [`VisualHints`] - Animation style, duration and colour roles for renderers
//!
//! # Construction
//!
//! Steps are checked once, when they are built or deserialized: every index a
//! step mentions lies inside its array and sorted regions never overlap.
//! Code that receives a [`Step`] never re-checks its shape.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SortVisError};

// ==================== Algorithm ====================

/// Sorting algorithms that can be turned into step sequences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    Bubble,
    Selection,
    Insertion,
}

/// Static facts about an algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlgorithmInfo {
    pub name: &'static str,
    /// Whether equal elements keep their relative order
    pub stable: bool,
    pub best: &'static str,
    pub average: &'static str,
    pub worst: &'static str,
    pub space: &'static str,
}

const BUBBLE_INFO: AlgorithmInfo = AlgorithmInfo {
    name: "Bubble Sort",
    stable: true,
    best: "O(n)",
    average: "O(n²)",
    worst: "O(n²)",
    space: "O(1)",
};

// Selection sort swaps across the unsorted tail, so equal keys can be reordered.
const SELECTION_INFO: AlgorithmInfo = AlgorithmInfo {
    name: "Selection Sort",
    stable: false,
    best: "O(n²)",
    average: "O(n²)",
    worst: "O(n²)",
    space: "O(1)",
};

const INSERTION_INFO: AlgorithmInfo = AlgorithmInfo {
    name: "Insertion Sort",
    stable: true,
    best: "O(n)",
    average: "O(n²)",
    worst: "O(n²)",
    space: "O(1)",
};

impl Algorithm {
    /// All supported algorithms
    pub const ALL: [Algorithm; 3] = [
        Algorithm::Bubble,
        Algorithm::Selection,
        Algorithm::Insertion,
    ];

    /// Static metadata for this algorithm
    pub fn info(&self) -> &'static AlgorithmInfo {
        match self {
            Algorithm::Bubble => &BUBBLE_INFO,
            Algorithm::Selection => &SELECTION_INFO,
            Algorithm::Insertion => &INSERTION_INFO,
        }
    }

    /// Display name for the algorithm
    pub fn display_name(&self) -> &'static str {
        self.info().name
    }

    /// Fixed complexity label for an operation type performed by this algorithm
    pub fn complexity(&self, kind: OperationType) -> Complexity {
        let (time, space) = match (self, kind) {
            (_, OperationType::Merge) => ("O(n log n)", "O(n)"),
            (Algorithm::Bubble, OperationType::Compare) => ("O(n²)", "O(1)"),
            (Algorithm::Bubble, OperationType::Swap) => ("O(n²)", "O(1)"),
            (Algorithm::Bubble, OperationType::Insert) => ("O(n²)", "O(1)"),
            (Algorithm::Selection, OperationType::Compare) => ("O(n²)", "O(1)"),
            (Algorithm::Selection, OperationType::Swap) => ("O(n)", "O(1)"),
            (Algorithm::Selection, OperationType::Insert) => ("O(n)", "O(1)"),
            (Algorithm::Insertion, OperationType::Compare) => ("O(n²)", "O(1)"),
            (Algorithm::Insertion, OperationType::Swap) => ("O(n²)", "O(1)"),
            (Algorithm::Insertion, OperationType::Insert) => ("O(n²)", "O(1)"),
        };
        Complexity {
            time: time.to_string(),
            space: space.to_string(),
        }
    }

    /// Short identifier used in config files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Bubble => "bubble",
            Algorithm::Selection => "selection",
            Algorithm::Insertion => "insertion",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = SortVisError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bubble" => Ok(Algorithm::Bubble),
            "selection" => Ok(Algorithm::Selection),
            "insertion" => Ok(Algorithm::Insertion),
            other => Err(SortVisError::InvalidArgument(format!(
                "unknown algorithm '{}'",
                other
            ))),
        }
    }
}

// ==================== Identity ====================

/// Opaque identifier of a step, unique within one generated sequence
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepId(pub u32);

impl fmt::Debug for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StepId({})", self.0)
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step-{:04}", self.0)
    }
}

// ==================== Colours ====================

/// An sRGB colour, serialized as `#rrggbb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = SortVisError;

    fn from_str(s: &str) -> Result<Self> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(SortVisError::InvalidArgument(format!(
                "invalid colour '{}'",
                s
            )));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|_| SortVisError::InvalidArgument(format!("invalid colour '{}'", s)))
        };
        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl TryFrom<String> for Color {
    type Error = SortVisError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// What a colour is used for when drawing a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorRole {
    Default,
    Comparing,
    Swapping,
    Sorted,
    Highlighted,
}

/// Colour palette handed to the generator and renderers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub default: Color,
    pub comparing: Color,
    pub swapping: Color,
    pub sorted: Color,
    pub highlighted: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            default: Color::rgb(0x4a, 0x90, 0xe2),
            comparing: Color::rgb(0xf5, 0xa6, 0x23),
            swapping: Color::rgb(0xd0, 0x02, 0x1b),
            sorted: Color::rgb(0x7e, 0xd3, 0x21),
            highlighted: Color::rgb(0x9b, 0x59, 0xb6),
        }
    }
}

impl Palette {
    /// Colour for a role
    pub fn color(&self, role: ColorRole) -> Color {
        match role {
            ColorRole::Default => self.default,
            ColorRole::Comparing => self.comparing,
            ColorRole::Swapping => self.swapping,
            ColorRole::Sorted => self.sorted,
            ColorRole::Highlighted => self.highlighted,
        }
    }

    /// Pick the listed roles into a role→colour map
    pub fn select(&self, roles: &[ColorRole]) -> BTreeMap<ColorRole, Color> {
        roles.iter().map(|&role| (role, self.color(role))).collect()
    }
}

// ==================== Array State ====================

/// Closed index interval `[start, end]` known to be in final position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortedRegion {
    pub start: usize,
    pub end: usize,
}

impl SortedRegion {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Check whether an index lies inside the region
    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index <= self.end
    }

    /// Check whether two regions share at least one index
    pub fn overlaps(&self, other: &SortedRegion) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Number of indices covered
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Regions are closed intervals, so never empty once valid
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Array contents of one step and the indices it draws attention to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "ArrayStateRepr")]
pub struct ArrayState {
    data: Vec<i64>,
    highlighted_indices: BTreeSet<usize>,
    comparison_pair: Option<(usize, usize)>,
    swap_pair: Option<(usize, usize)>,
    sorted_regions: Vec<SortedRegion>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArrayStateRepr {
    data: Vec<i64>,
    #[serde(default)]
    highlighted_indices: BTreeSet<usize>,
    #[serde(default)]
    comparison_pair: Option<(usize, usize)>,
    #[serde(default)]
    swap_pair: Option<(usize, usize)>,
    #[serde(default)]
    sorted_regions: Vec<SortedRegion>,
}

impl TryFrom<ArrayStateRepr> for ArrayState {
    type Error = SortVisError;

    fn try_from(repr: ArrayStateRepr) -> Result<Self> {
        ArrayStateBuilder {
            data: repr.data,
            highlighted_indices: repr.highlighted_indices,
            comparison_pair: repr.comparison_pair,
            swap_pair: repr.swap_pair,
            sorted_regions: repr.sorted_regions,
        }
        .build()
    }
}

impl ArrayState {
    /// Start building an array state around a copy of the data
    pub fn builder(data: &[i64]) -> ArrayStateBuilder {
        ArrayStateBuilder {
            data: data.to_vec(),
            highlighted_indices: BTreeSet::new(),
            comparison_pair: None,
            swap_pair: None,
            sorted_regions: Vec::new(),
        }
    }

    pub fn data(&self) -> &[i64] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn highlighted_indices(&self) -> &BTreeSet<usize> {
        &self.highlighted_indices
    }

    pub fn comparison_pair(&self) -> Option<(usize, usize)> {
        self.comparison_pair
    }

    pub fn swap_pair(&self) -> Option<(usize, usize)> {
        self.swap_pair
    }

    pub fn sorted_regions(&self) -> &[SortedRegion] {
        &self.sorted_regions
    }

    /// Check whether an index falls in any sorted region
    pub fn is_sorted_index(&self, index: usize) -> bool {
        self.sorted_regions.iter().any(|r| r.contains(index))
    }
}

/// Builder for [`ArrayState`]; `build` enforces the index invariants
#[derive(Debug, Clone)]
pub struct ArrayStateBuilder {
    data: Vec<i64>,
    highlighted_indices: BTreeSet<usize>,
    comparison_pair: Option<(usize, usize)>,
    swap_pair: Option<(usize, usize)>,
    sorted_regions: Vec<SortedRegion>,
}

impl ArrayStateBuilder {
    pub fn highlight(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.highlighted_indices.extend(indices);
        self
    }

    pub fn comparing(mut self, left: usize, right: usize) -> Self {
        self.comparison_pair = Some((left, right));
        self
    }

    pub fn swapping(mut self, left: usize, right: usize) -> Self {
        self.swap_pair = Some((left, right));
        self
    }

    pub fn sorted(mut self, region: Option<SortedRegion>) -> Self {
        self.sorted_regions.extend(region);
        self
    }

    pub fn build(self) -> Result<ArrayState> {
        let len = self.data.len();
        let in_bounds = |i: usize| i < len;
        let pair_ok =
            |p: Option<(usize, usize)>| p.map_or(true, |(a, b)| in_bounds(a) && in_bounds(b));

        if let Some(&bad) = self.highlighted_indices.iter().find(|&&i| !in_bounds(i)) {
            return Err(SortVisError::InvalidStep(format!(
                "highlighted index {} outside array of length {}",
                bad, len
            )));
        }
        if !pair_ok(self.comparison_pair) {
            return Err(SortVisError::InvalidStep(format!(
                "comparison pair {:?} outside array of length {}",
                self.comparison_pair, len
            )));
        }
        if !pair_ok(self.swap_pair) {
            return Err(SortVisError::InvalidStep(format!(
                "swap pair {:?} outside array of length {}",
                self.swap_pair, len
            )));
        }
        for (i, region) in self.sorted_regions.iter().enumerate() {
            if region.start > region.end || !in_bounds(region.end) {
                return Err(SortVisError::InvalidStep(format!(
                    "sorted region {:?} invalid for array of length {}",
                    region, len
                )));
            }
            if self.sorted_regions[..i].iter().any(|r| r.overlaps(region)) {
                return Err(SortVisError::InvalidStep(format!(
                    "sorted region {:?} overlaps another region",
                    region
                )));
            }
        }

        Ok(ArrayState {
            data: self.data,
            highlighted_indices: self.highlighted_indices,
            comparison_pair: self.comparison_pair,
            swap_pair: self.swap_pair,
            sorted_regions: self.sorted_regions,
        })
    }
}

// ==================== Operations ====================

/// Coarse operation category shown to users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    Compare,
    Swap,
    Insert,
    Merge,
}

impl OperationType {
    pub fn display_name(&self) -> &'static str {
        match self {
            OperationType::Compare => "Compare",
            OperationType::Swap => "Swap",
            OperationType::Insert => "Insert",
            OperationType::Merge => "Merge",
        }
    }
}

/// What happened in a step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum StepAction {
    /// Two elements are compared
    Compare { left: usize, right: usize },
    /// A strictly smaller minimum was found (selection sort)
    NewMinimum { index: usize },
    /// The key element is lifted out for insertion
    Extract { index: usize },
    /// Two elements are about to be exchanged
    Swap { left: usize, right: usize },
    /// An element is about to move one slot to the right
    Shift { from: usize, to: usize },
    /// The key element is written into its slot
    Place { index: usize },
    /// A run of elements is merged in place
    Merge { start: usize, end: usize },
    /// An outer pass finished and grew the sorted region
    PassComplete { region: SortedRegion },
    /// The whole array is sorted
    SortComplete,
}

impl StepAction {
    /// Operation category of this action
    pub fn kind(&self) -> OperationType {
        match self {
            StepAction::Compare { .. }
            | StepAction::NewMinimum { .. }
            | StepAction::Extract { .. }
            | StepAction::PassComplete { .. }
            | StepAction::SortComplete => OperationType::Compare,
            StepAction::Swap { .. } => OperationType::Swap,
            StepAction::Shift { .. } | StepAction::Place { .. } => OperationType::Insert,
            StepAction::Merge { .. } => OperationType::Merge,
        }
    }

    /// Whether this action marks the end of a pass or of the whole sort
    pub fn is_completion(&self) -> bool {
        matches!(
            self,
            StepAction::PassComplete { .. } | StepAction::SortComplete
        )
    }

    /// Every array index the action refers to
    pub fn indices(&self) -> Vec<usize> {
        match *self {
            StepAction::Compare { left, right } | StepAction::Swap { left, right } => {
                vec![left, right]
            }
            StepAction::NewMinimum { index }
            | StepAction::Extract { index }
            | StepAction::Place { index } => vec![index],
            StepAction::Shift { from, to } => vec![from, to],
            StepAction::Merge { start, end } => vec![start, end],
            StepAction::PassComplete { region } => vec![region.start, region.end],
            StepAction::SortComplete => Vec::new(),
        }
    }

    /// Animation used by renderers for this action
    pub fn animation(&self) -> (AnimationType, u32) {
        match self {
            StepAction::PassComplete { .. } | StepAction::SortComplete => {
                (AnimationType::Fade, 500)
            }
            StepAction::Swap { .. }
            | StepAction::Shift { .. }
            | StepAction::Place { .. }
            | StepAction::Merge { .. } => (AnimationType::Slide, 400),
            _ => (AnimationType::Highlight, 300),
        }
    }

    /// Colour roles relevant to this action
    pub fn color_roles(&self) -> &'static [ColorRole] {
        match self {
            StepAction::Compare { .. } => {
                &[ColorRole::Default, ColorRole::Comparing, ColorRole::Sorted]
            }
            StepAction::NewMinimum { .. } | StepAction::Extract { .. } => {
                &[ColorRole::Default, ColorRole::Highlighted, ColorRole::Sorted]
            }
            StepAction::Swap { .. }
            | StepAction::Shift { .. }
            | StepAction::Place { .. }
            | StepAction::Merge { .. } => {
                &[ColorRole::Default, ColorRole::Swapping, ColorRole::Sorted]
            }
            StepAction::PassComplete { .. } | StepAction::SortComplete => {
                &[ColorRole::Default, ColorRole::Sorted]
            }
        }
    }
}

/// Complexity label attached to an operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Complexity {
    pub time: String,
    pub space: String,
}

/// The operation a step performs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "OperationRepr")]
pub struct Operation {
    #[serde(rename = "type")]
    kind: OperationType,
    #[serde(flatten)]
    action: StepAction,
    description: String,
    complexity: Complexity,
}

#[derive(Deserialize)]
struct OperationRepr {
    #[serde(rename = "type")]
    kind: OperationType,
    #[serde(flatten)]
    action: StepAction,
    description: String,
    complexity: Complexity,
}

impl TryFrom<OperationRepr> for Operation {
    type Error = SortVisError;

    fn try_from(repr: OperationRepr) -> Result<Self> {
        if repr.kind != repr.action.kind() {
            return Err(SortVisError::InvalidStep(format!(
                "operation type {:?} does not match action {:?}",
                repr.kind, repr.action
            )));
        }
        Ok(Self {
            kind: repr.kind,
            action: repr.action,
            description: repr.description,
            complexity: repr.complexity,
        })
    }
}

impl Operation {
    pub fn new(action: StepAction, description: impl Into<String>, complexity: Complexity) -> Self {
        Self {
            kind: action.kind(),
            action,
            description: description.into(),
            complexity,
        }
    }

    pub fn kind(&self) -> OperationType {
        self.kind
    }

    pub fn action(&self) -> &StepAction {
        &self.action
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn complexity(&self) -> &Complexity {
        &self.complexity
    }
}

// ==================== Visual Hints ====================

/// Animation style suggested to renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationType {
    Highlight,
    Slide,
    Fade,
}

/// Rendering hints carried by a step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualHints {
    pub animation_type: AnimationType,
    pub duration_ms: u32,
    pub colors: BTreeMap<ColorRole, Color>,
}

impl VisualHints {
    /// Hints for an action, with colours taken from the palette
    pub fn for_action(action: &StepAction, palette: &Palette) -> Self {
        let (animation_type, duration_ms) = action.animation();
        Self {
            animation_type,
            duration_ms,
            colors: palette.select(action.color_roles()),
        }
    }
}

// ==================== Step ====================

/// One immutable frame of algorithm progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "StepRepr")]
pub struct Step {
    step_id: StepId,
    sequence_number: u32,
    array_state: ArrayState,
    operation: Operation,
    visual_hints: VisualHints,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StepRepr {
    step_id: StepId,
    sequence_number: u32,
    array_state: ArrayState,
    operation: Operation,
    visual_hints: VisualHints,
}

impl TryFrom<StepRepr> for Step {
    type Error = SortVisError;

    fn try_from(repr: StepRepr) -> Result<Self> {
        Step::new(
            repr.step_id,
            repr.sequence_number,
            repr.array_state,
            repr.operation,
            repr.visual_hints,
        )
    }
}

impl Step {
    /// Create a step, checking that the operation only refers to indices of the array
    pub fn new(
        step_id: StepId,
        sequence_number: u32,
        array_state: ArrayState,
        operation: Operation,
        visual_hints: VisualHints,
    ) -> Result<Self> {
        if sequence_number == 0 {
            return Err(SortVisError::InvalidStep(
                "sequence numbers start at 1".to_string(),
            ));
        }
        let len = array_state.len();
        if let Some(bad) = operation.action().indices().into_iter().find(|&i| i >= len) {
            return Err(SortVisError::InvalidStep(format!(
                "step {} refers to index {} outside array of length {}",
                sequence_number, bad, len
            )));
        }
        Ok(Self {
            step_id,
            sequence_number,
            array_state,
            operation,
            visual_hints,
        })
    }

    pub fn id(&self) -> StepId {
        self.step_id
    }

    /// 1-based position in the sequence
    pub fn sequence_number(&self) -> u32 {
        self.sequence_number
    }

    pub fn array_state(&self) -> &ArrayState {
        &self.array_state
    }

    /// Shortcut for `array_state().data()`
    pub fn data(&self) -> &[i64] {
        self.array_state.data()
    }

    pub fn operation(&self) -> &Operation {
        &self.operation
    }

    pub fn visual_hints(&self) -> &VisualHints {
        &self.visual_hints
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compare_step(data: &[i64], left: usize, right: usize) -> Result<Step> {
        let action = StepAction::Compare { left, right };
        let state = ArrayState::builder(data)
            .highlight([left, right])
            .comparing(left, right)
            .build()?;
        let complexity = Algorithm::Bubble.complexity(action.kind());
        let hints = VisualHints::for_action(&action, &Palette::default());
        Step::new(
            StepId(1),
            1,
            state,
            Operation::new(action, "Compare", complexity),
            hints,
        )
    }

    #[test]
    fn test_algorithm_parse_and_display() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.as_str().parse::<Algorithm>().unwrap(), algorithm);
        }
        assert_eq!(" Bubble ".parse::<Algorithm>().unwrap(), Algorithm::Bubble);
        assert!("quick".parse::<Algorithm>().is_err());
    }

    #[test]
    fn test_selection_is_not_stable() {
        assert!(Algorithm::Bubble.info().stable);
        assert!(!Algorithm::Selection.info().stable);
        assert!(Algorithm::Insertion.info().stable);
    }

    #[test]
    fn test_complexity_table() {
        let c = Algorithm::Selection.complexity(OperationType::Swap);
        assert_eq!(c.time, "O(n)");
        assert_eq!(c.space, "O(1)");
        assert_eq!(
            Algorithm::Insertion.complexity(OperationType::Merge).space,
            "O(n)"
        );
    }

    #[test]
    fn test_color_hex_round_trip() {
        let color: Color = "#7ed321".parse().unwrap();
        assert_eq!(color, Color::rgb(0x7e, 0xd3, 0x21));
        assert_eq!(color.to_string(), "#7ed321");
        assert!("#12345".parse::<Color>().is_err());
        assert!("zzzzzz".parse::<Color>().is_err());
    }

    #[test]
    fn test_array_state_rejects_out_of_range() {
        let data = [3, 1, 2];
        assert!(ArrayState::builder(&data).highlight([3]).build().is_err());
        assert!(ArrayState::builder(&data).comparing(0, 5).build().is_err());
        assert!(ArrayState::builder(&data).swapping(9, 0).build().is_err());
        assert!(ArrayState::builder(&data)
            .sorted(Some(SortedRegion::new(1, 3)))
            .build()
            .is_err());
    }

    #[test]
    fn test_array_state_rejects_overlapping_regions() {
        let data = [1, 2, 3, 4];
        let result = ArrayState::builder(&data)
            .sorted(Some(SortedRegion::new(0, 1)))
            .sorted(Some(SortedRegion::new(1, 3)))
            .build();
        assert!(result.is_err());

        let ok = ArrayState::builder(&data)
            .sorted(Some(SortedRegion::new(0, 1)))
            .sorted(Some(SortedRegion::new(2, 3)))
            .build()
            .unwrap();
        assert!(ok.is_sorted_index(2));
    }

    #[test]
    fn test_step_rejects_action_outside_array() {
        let state = ArrayState::builder(&[1, 2]).build().unwrap();
        let action = StepAction::Swap { left: 0, right: 2 };
        let result = Step::new(
            StepId(1),
            1,
            state,
            Operation::new(action.clone(), "Swap", Algorithm::Bubble.complexity(action.kind())),
            VisualHints::for_action(&action, &Palette::default()),
        );
        assert!(matches!(result, Err(SortVisError::InvalidStep(_))));
    }

    #[test]
    fn test_step_json_shape() {
        let step = compare_step(&[2, 1], 0, 1).unwrap();
        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(json["sequenceNumber"], 1);
        assert_eq!(json["operation"]["type"], "compare");
        assert_eq!(json["operation"]["action"], "compare");
        assert_eq!(json["visualHints"]["animationType"], "highlight");
        assert_eq!(json["arrayState"]["comparisonPair"][1], 1);

        let back: Step = serde_json::from_value(json).unwrap();
        assert_eq!(back, step);
    }

    #[test]
    fn test_step_deserialize_rejects_bad_indices() {
        let step = compare_step(&[2, 1], 0, 1).unwrap();
        let mut json = serde_json::to_value(&step).unwrap();
        json["arrayState"]["highlightedIndices"] = serde_json::json!([0, 4]);
        assert!(serde_json::from_value::<Step>(json).is_err());
    }

    #[test]
    fn test_action_kinds() {
        assert_eq!(StepAction::Extract { index: 0 }.kind(), OperationType::Compare);
        assert_eq!(StepAction::Shift { from: 0, to: 1 }.kind(), OperationType::Insert);
        assert_eq!(StepAction::SortComplete.kind(), OperationType::Compare);
        assert!(StepAction::SortComplete.is_completion());
        assert!(!StepAction::Swap { left: 0, right: 1 }.is_completion());
    }
}
