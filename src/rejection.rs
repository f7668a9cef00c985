//! # Rejection Rules Module
//!
//! Noise filter for extracted ingredient names.
//!
//! Free-text recipes are full of phrases that look like `<quantity> <noun>`
//! but are not ingredients: "2 minutes", "a little more", "1 large bowl",
//! "some chopped onion". Every rule here is a regular expression tagged with
//! a [`RejectCategory`]; the whole table is compiled once into a single
//! [`RegexSet`] so a name is tested against every rule in one pass.
//!
//! A name matching ANY rule is rejected. This takes precedence over lexicon
//! membership: "chopped onion" contains a known ingredient but is still
//! discarded because "chopped" is a preparation verb.

use lazy_static::lazy_static;
use log::trace;
use regex::RegexSet;
use serde::Serialize;
use std::fmt;

/// Why a name was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RejectCategory {
    /// Amount words: "more", "handful", "half", "portion"
    Quantifier,
    /// Cooking and preparation verbs in any inflection
    CookingVerb,
    /// Sequencing and time words: "then", "minutes", "overnight"
    Temporal,
    /// Articles, prepositions, pronouns, auxiliaries and filler adverbs
    Stopword,
    /// Temperature, texture, taste and doneness adjectives
    Descriptor,
    /// Spelled-out numbers and ordinals
    Numeral,
    /// Pots, pans and utensils
    Kitchenware,
    /// Words about the recipe itself rather than its contents
    RecipeMeta,
    /// Single letters and one- or two-character tokens
    ShortToken,
    /// Name starts with an imperative cooking verb
    VerbPrefix,
}

impl fmt::Display for RejectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RejectCategory::Quantifier => "quantifier",
            RejectCategory::CookingVerb => "cooking verb",
            RejectCategory::Temporal => "temporal word",
            RejectCategory::Stopword => "stopword",
            RejectCategory::Descriptor => "descriptor",
            RejectCategory::Numeral => "numeral",
            RejectCategory::Kitchenware => "kitchenware",
            RejectCategory::RecipeMeta => "recipe meta word",
            RejectCategory::ShortToken => "short token",
            RejectCategory::VerbPrefix => "verb prefix",
        };
        write!(f, "{label}")
    }
}

use RejectCategory::*;

/// The rejection table. Order is irrelevant for the accept/reject decision;
/// it only decides which category [`rejection_reason`] reports first.
pub const REJECTION_RULES: &[(RejectCategory, &str)] = &[
    // Amounts and measures
    (Quantifier, r"\b(less|more|extra|enough|plenty|sufficient|adequate)\b"),
    (Quantifier, r"\b(amount|quantity|portion|serving|measure|measurement)\b"),
    (Quantifier, r"\b(handful|pinch|dash|splash|sprinkle|drizzle)\b"),
    (Quantifier, r"\b(little|some|few|several|many|much|lot)\b"),
    (Quantifier, r"\b(half|quarter|third|double|triple)\b"),
    (Quantifier, r"\b(piece|pieces|slice|slices|chunk|chunks)\b"),
    (Quantifier, r"\b(level|heaping|rounded|packed)\b"),
    (Quantifier, r"\b(taste|tasting|adjust|according|required|needed)\b"),
    (Quantifier, r"\b(prefer|preference|optional|choice|variation)\b"),
    (Quantifier, r"\b(to taste|as needed|as required|if needed)\b"),
    (Quantifier, r"\b(for serving|for garnish|for decoration)\b"),
    (Quantifier, r"\b(according to taste|based on preference)\b"),
    // Cooking verbs, every inflection
    (CookingVerb, r"\b(cook|cooking|cooks|stir|stirring|stirs)\b"),
    (CookingVerb, r"\b(add|adding|adds|mix|mixing|mixes)\b"),
    (CookingVerb, r"\b(serve|serving|serves|served|fry|frying|fries)\b"),
    (CookingVerb, r"\b(boil|boiling|boils|bake|baking|bakes)\b"),
    (CookingVerb, r"\b(heat|heating|heats|preheat|preheating|preheats)\b"),
    (CookingVerb, r"\b(simmer|simmering|simmers|saute|sauteing|sautes|sauté)\b"),
    (CookingVerb, r"\b(roast|roasting|roasts|grill|grilling|grills)\b"),
    (CookingVerb, r"\b(steam|steaming|steams|blanch|blanching|blanches)\b"),
    (CookingVerb, r"\b(broil|broiling|broils|toast|toasting|toasts)\b"),
    (CookingVerb, r"\b(poach|poaching|poaches)\b"),
    (CookingVerb, r"\b(cooked|stirred|added|mixed|fried|boiled)\b"),
    (CookingVerb, r"\b(baked|heated|preheated|simmered|sauteed|roasted)\b"),
    (CookingVerb, r"\b(grilled|steamed|blanched|broiled|toasted|poached)\b"),
    (CookingVerb, r"\b(prepared|finished|combined|blended|whisked)\b"),
    (CookingVerb, r"\b(melted|dissolved|reduced|thickened)\b"),
    (CookingVerb, r"\b(chop|chopping|chops|slice|slicing|slices)\b"),
    (CookingVerb, r"\b(dice|dicing|dices|mince|mincing|minces)\b"),
    (CookingVerb, r"\b(grate|grating|grates|grind|grinding|grinds)\b"),
    (CookingVerb, r"\b(crush|crushing|crushes|peel|peeling|peels)\b"),
    (CookingVerb, r"\b(wash|washing|washes|rinse|rinsing|rinses)\b"),
    (CookingVerb, r"\b(drain|draining|drains|soak|soaking|soaks)\b"),
    (CookingVerb, r"\b(marinate|marinating|marinates|season|seasoning|seasons)\b"),
    (CookingVerb, r"\b(garnish|garnishing|garnishes|garnished|squeeze|squeezing|squeezes)\b"),
    (CookingVerb, r"\b(strain|straining|strains|filter|filtering|filters)\b"),
    (CookingVerb, r"\b(chopped|sliced|diced|minced|grated|ground)\b"),
    (CookingVerb, r"\b(crushed|peeled|washed|rinsed|drained|soaked)\b"),
    (CookingVerb, r"\b(marinated|seasoned|squeezed|strained)\b"),
    (CookingVerb, r"\b(filtered|cleaned|trimmed|cut|shredded)\b"),
    (CookingVerb, r"\b(pour|pouring|pours|poured|use|using|uses|used)\b"),
    (CookingVerb, r"\b(put|putting|puts|take|taking|takes|took|taken)\b"),
    (CookingVerb, r"\b(keep|keeping|keeps|kept|let|letting|lets)\b"),
    (CookingVerb, r"\b(bring|bringing|brings|brought|reduce|reducing|reduces)\b"),
    (CookingVerb, r"\b(turn|turning|turns|turned|flip|flipping|flips|flipped)\b"),
    (CookingVerb, r"\b(cover|covering|covers|covered|uncover|uncovering|uncovers|uncovered)\b"),
    (CookingVerb, r"\b(remove|removing|removes|removed|transfer|transferring|transfers|transferred)\b"),
    (CookingVerb, r"\b(place|placing|places|placed|set|setting|sets)\b"),
    (CookingVerb, r"\b(arrange|arranging|arranges|arranged)\b"),
    (CookingVerb, r"\b(blend|blending|blends|whisk|whisking|whisks)\b"),
    (CookingVerb, r"\b(beat|beating|beats|beaten|whip|whipping|whips|whipped)\b"),
    (CookingVerb, r"\b(fold|folding|folds|folded|knead|kneading|kneads|kneaded)\b"),
    (CookingVerb, r"\b(combine|combining|combines)\b"),
    (CookingVerb, r"\b(incorporate|incorporating|incorporates|incorporated)\b"),
    (CookingVerb, r"\b(toss|tossing|tosses|tossed)\b"),
    (CookingVerb, r"\b(plate|plated|plating|presentation)\b"),
    (CookingVerb, r"\b(enjoy|enjoying|enjoys|enjoyed)\b"),
    // Sequencing and time
    (Temporal, r"\b(then|now|next|after|before|during|while|until)\b"),
    (Temporal, r"\b(when|once|finally|lastly)\b"),
    (Temporal, r"\b(meanwhile|simultaneously|immediately|gradually)\b"),
    (Temporal, r"\b(already|still|yet|just|soon|later)\b"),
    (Temporal, r"\b(minute|minutes|hour|hours|second|seconds)\b"),
    (Temporal, r"\b(overnight|day|days|week|weeks|month|months)\b"),
    // Function words and filler
    (Stopword, r"\b(of|in|on|at|to|for|with|from|by|about)\b"),
    (Stopword, r"\b(into|onto|over|under|above|below|between|among)\b"),
    (Stopword, r"\b(through|across|along|around|behind|beside)\b"),
    (Stopword, r"\b(near|against|without|within|towards|upon)\b"),
    (Stopword, r"\b(and|or|but|nor|so|if|though|although)\b"),
    (Stopword, r"\b(because|since|unless|whereas|whether)\b"),
    (Stopword, r"\b(a|an|the|this|that|these|those)\b"),
    (Stopword, r"\b(my|your|his|her|its|our|their)\b"),
    (Stopword, r"\b(each|every|all|both|any|no|none)\b"),
    (Stopword, r"\b(it|they|them|we|us|you|he|she|him)\b"),
    (Stopword, r"\b(what|which|who|whom|whose|where|why|how)\b"),
    (Stopword, r"\b(be|is|are|am|was|were|been|being)\b"),
    (Stopword, r"\b(have|has|had|having|do|does|did|doing|done)\b"),
    (Stopword, r"\b(will|would|shall|should|can|could|may|might|must)\b"),
    (Stopword, r"\b(well|very|too|quite|rather|really|truly)\b"),
    (Stopword, r"\b(simply|only|merely|exactly|precisely)\b"),
    (Stopword, r"\b(always|never|often|rarely)\b"),
    (Stopword, r"\b(quickly|slowly|gently|carefully|thoroughly)\b"),
    (Stopword, r"\b(evenly|uniformly|constantly|continuously)\b"),
    (Stopword, r"\b(make|makes|made|making|give|gives|gave|given|giving)\b"),
    (Stopword, r"\b(get|gets|got|gotten|getting|become|becomes|became|becoming)\b"),
    (Stopword, r"\b(see|sees|saw|seen|seeing|look|looks|looked|looking)\b"),
    (Stopword, r"\b(find|finds|found|finding|want|wants|wanted|wanting)\b"),
    (Stopword, r"\b(need|needs|needing|try|tries|tried|trying)\b"),
    (Stopword, r"\b(help|helps|helped|helping|start|starts|started|starting)\b"),
    (Stopword, r"\b(stop|stops|stopped|stopping|continue|continues|continued|continuing)\b"),
    (Stopword, r"\b(not|neither|yes|ok|okay|sure|certainly|definitely)\b"),
    (Stopword, r"\b(like|as|than|same|similar|different)\b"),
    (Stopword, r"\b(such|kind|type|sort|variety)\b"),
    (Stopword, r"\b(better|worse|best|worst|most|least)\b"),
    (Stopword, r"\b(here|there|anywhere|somewhere|everywhere)\b"),
    (Stopword, r"\b(something|anything|nothing|everything)\b"),
    (Stopword, r"\b(such as|like this|for example)\b"),
    (Stopword, r"\b(in order|so that|make sure)\b"),
    (Stopword, r"\b(you can|you may|you should|you need)\b"),
    // Adjectives
    (Descriptor, r"\b(mild|medium|spicy|hot|cold|warm|cool)\b"),
    (Descriptor, r"\b(salty|sweet|sour|bitter|tangy|savory)\b"),
    (Descriptor, r"\b(strong|weak|light|heavy|thick|thin)\b"),
    (Descriptor, r"\b(room temperature|chilled)\b"),
    (Descriptor, r"\b(frozen|thawed|fresh|stale|ripe|unripe)\b"),
    (Descriptor, r"\b(crispy|crunchy|soft|tender|firm|hard)\b"),
    (Descriptor, r"\b(smooth|creamy|chunky|lumpy|grainy)\b"),
    (Descriptor, r"\b(raw|undercooked|overcooked|ready)\b"),
    (Descriptor, r"\b(golden|brown|browned|caramelized|charred)\b"),
    (Descriptor, r"\b(translucent|opaque|clear|cloudy)\b"),
    (Descriptor, r"\b(delicious|yummy|tasty|flavorful|aromatic)\b"),
    (Descriptor, r"\b(homemade|traditional|authentic|classic|modern)\b"),
    (Descriptor, r"\b(easy|simple|quick|fast|slow|difficult)\b"),
    (Descriptor, r"\b(healthy|nutritious|diet|low fat|low calorie)\b"),
    (Descriptor, r"\b(vegan|vegetarian|non veg|gluten free|dairy free)\b"),
    (Descriptor, r"\b(top|bottom|side|center|middle|edge)\b"),
    (Descriptor, r"\b(left|right|front|back|inside|outside)\b"),
    (Descriptor, r"\b(up|down|high|low|deep|shallow)\b"),
    // Numbers
    (Numeral, r"\b(zero|one|two|three|four|five|six|seven|eight|nine|ten)\b"),
    (Numeral, r"\b(eleven|twelve|thirteen|fourteen|fifteen|sixteen|seventeen|eighteen|nineteen|twenty)\b"),
    (Numeral, r"\b(thirty|forty|fifty|sixty|seventy|eighty|ninety|hundred|thousand)\b"),
    (Numeral, r"\b(first|fourth|fifth|sixth|seventh|eighth|ninth|tenth)\b"),
    // Utensils
    (Kitchenware, r"\b(dish|bowl|pan|pot|container|wok|kadhai|tawa|griddle)\b"),
    (Kitchenware, r"\b(jar|bottle|bag)\b"),
    (Kitchenware, r"\b(spoon|fork|knife|spatula|ladle)\b"),
    (Kitchenware, r"\b(blender|mixer|grinder|processor|oven|stove)\b"),
    // Words about the recipe
    (RecipeMeta, r"\b(method|procedure|instructions|steps|directions)\b"),
    (RecipeMeta, r"\b(recipe|preparation|prep|total)\b"),
    (RecipeMeta, r"\b(ingredients|ingredient|items|item|things|thing|stuff)\b"),
    (RecipeMeta, r"\b(note|tip|tips|important|remember)\b"),
    (RecipeMeta, r"\b(necessary|essential)\b"),
    (RecipeMeta, r"\b(way|ways|means|manner)\b"),
    (RecipeMeta, r"\b(video|cooking|kitchen|food|eat|eating)\b"),
    // Tiny tokens
    (ShortToken, r"\b[a-z]\b"),
    (ShortToken, r"\b\w{1,2}\b"),
    // Imperative openers, matched as a raw prefix
    (
        VerbPrefix,
        r"^(cook|stir|add|mix|serve|fry|boil|bake|heat|preheat|chop|slice|dice|grate|grind|pour|simmer|use|put|take|keep|let|bring|reduce|thicken|turn|flip|cover|uncover)",
    ),
];

lazy_static! {
    static ref REJECTION_SET: RegexSet =
        RegexSet::new(REJECTION_RULES.iter().map(|(_, pattern)| *pattern))
            .expect("Rejection rules should be valid regular expressions");
}

/// Check whether a candidate name is noise.
///
/// # Examples
///
/// ```rust
/// use kitchenmate::rejection::is_rejected;
///
/// assert!(is_rejected("chopped onion"));
/// assert!(is_rejected("minutes"));
/// assert!(!is_rejected("basmati rice"));
/// ```
pub fn is_rejected(name: &str) -> bool {
    REJECTION_SET.is_match(name)
}

/// Category of the first rule the name matches, if any
pub fn rejection_reason(name: &str) -> Option<RejectCategory> {
    let reason = REJECTION_SET
        .matches(name)
        .iter()
        .next()
        .map(|index| REJECTION_RULES[index].0);

    if let Some(category) = reason {
        trace!("Rejected '{}' as {}", name, category);
    }

    reason
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_compile() {
        assert_eq!(REJECTION_SET.len(), REJECTION_RULES.len());
    }

    #[test]
    fn test_plain_ingredients_pass() {
        let names = vec![
            "rice",
            "basmati rice",
            "onion",
            "tomato",
            "paneer",
            "red chilli powder",
            "green chillies",
            "coriander leaves",
            "mustard oil",
        ];
        for name in names {
            assert!(!is_rejected(name), "'{}' should be accepted", name);
        }
    }

    #[test]
    fn test_categories() {
        let cases = vec![
            ("chopped onion", CookingVerb),
            ("more salt", Quantifier),
            ("minutes", Temporal),
            ("large bowl", Kitchenware),
            ("soft dough", Descriptor),
            ("twenty", Numeral),
            ("recipe", RecipeMeta),
            ("the rice", Stopword),
            ("xy", ShortToken),
        ];
        for (name, expected) in cases {
            assert_eq!(
                rejection_reason(name),
                Some(expected),
                "Unexpected category for '{}'",
                name
            );
        }
    }

    #[test]
    fn test_verb_prefix_catches_glued_words() {
        // No word boundary is needed for the prefix rule
        assert_eq!(rejection_reason("cooker"), Some(VerbPrefix));
        assert_eq!(rejection_reason("stirfry"), Some(VerbPrefix));
    }

    #[test]
    fn test_rejection_overrides_known_ingredients() {
        // All of these contain a lexicon term
        assert!(is_rejected("fresh cream"));
        assert!(is_rejected("ground cumin"));
        // "let" and "turn" are verb prefixes
        assert!(is_rejected("lettuce"));
        assert!(is_rejected("turnip"));
    }

    #[test]
    fn test_clean_name_has_no_reason() {
        assert_eq!(rejection_reason("cumin seeds"), None);
    }
}
