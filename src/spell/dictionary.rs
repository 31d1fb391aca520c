//! Frequency dictionary backing the correction oracles
//!
//! Maps known words to corpus occurrence counts. Counts order suggestion
//! candidates when several words sit at the same edit distance. The
//! built-in list covers the high-frequency core of English; a full-size
//! dictionary can be loaded from a `word count` text file.

use crate::error::Result;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// High-frequency English words with corpus occurrence counts.
const BUILTIN_WORDS: &[(&str, u64)] = &[
    ("the", 23135851162),
    ("of", 13151942776),
    ("and", 12997637966),
    ("to", 12136980858),
    ("a", 9081174698),
    ("in", 8469404971),
    ("for", 5933321709),
    ("is", 4705743816),
    ("on", 3750423199),
    ("that", 3400031103),
    ("by", 3350048871),
    ("this", 3228469771),
    ("with", 3183110675),
    ("i", 3086225277),
    ("you", 2996181025),
    ("it", 2813163874),
    ("not", 2633487141),
    ("or", 2590739907),
    ("be", 2398724162),
    ("are", 2393614870),
    ("from", 2275595356),
    ("at", 2272272772),
    ("as", 2247431740),
    ("your", 1620719746),
    ("all", 1595660191),
    ("have", 1309892093),
    ("new", 1112282309),
    ("more", 1090289953),
    ("an", 1066266088),
    ("was", 1055867384),
    ("we", 1046275538),
    ("will", 1018446021),
    ("home", 1005395125),
    ("can", 994255050),
    ("us", 972644715),
    ("about", 970226931),
    ("if", 933954020),
    ("my", 919734409),
    ("has", 917427930),
    ("but", 888623990),
    ("our", 886437929),
    ("one", 886374355),
    ("other", 863176421),
    ("do", 823798140),
    ("no", 800468112),
    ("information", 797054971),
    ("time", 771099877),
    ("they", 766099628),
    ("he", 739559269),
    ("up", 717493576),
    ("may", 711380646),
    ("what", 705383172),
    ("which", 701153332),
    ("their", 698747614),
    ("out", 680062884),
    ("use", 673411087),
    ("any", 663415953),
    ("there", 658113117),
    ("see", 656294898),
    ("only", 654684537),
    ("so", 654658352),
    ("his", 651981817),
    ("when", 650880636),
    ("here", 649094772),
    ("who", 643387694),
    ("also", 640259177),
    ("now", 621890444),
    ("help", 456733728),
    ("get", 639544669),
    ("view", 483119080),
    ("first", 578161543),
    ("am", 436505209),
    ("been", 583704374),
    ("would", 572644147),
    ("how", 571848080),
    ("were", 570699558),
    ("me", 566617666),
    ("some", 545200636),
    ("these", 541003982),
    ("its", 538604883),
    ("like", 530560931),
    ("than", 513156815),
    ("find", 509910676),
    ("date", 392555240),
    ("back", 410209745),
    ("people", 477555329),
    ("list", 452117379),
    ("name", 422698487),
    ("just", 422112113),
    ("over", 420788565),
    ("year", 364608431),
    ("day", 346168211),
    ("into", 344435805),
    ("two", 342577550),
    ("health", 337368332),
    ("world", 334901655),
    ("next", 329968457),
    ("used", 325113916),
    ("go", 324270974),
    ("work", 319154221),
    ("last", 317655591),
    ("most", 316878030),
    ("music", 313215775),
    ("data", 309106305),
    ("make", 307377554),
    ("them", 304157344),
    ("should", 299650268),
    ("product", 295772431),
    ("post", 293386535),
    ("her", 291464908),
    ("city", 285823872),
    ("add", 284842730),
    ("such", 280846897),
    ("please", 280135610),
    ("after", 278184484),
    ("best", 274619562),
    ("then", 270774082),
    ("good", 262706178),
    ("well", 259468417),
    ("love", 259390750),
    ("long", 258162267),
    ("through", 245559630),
    ("before", 241015166),
    ("really", 238284904),
    ("think", 190118512),
    ("where", 252915712),
    ("right", 232779119),
    ("because", 221014055),
    ("each", 220705949),
    ("those", 178773183),
    ("want", 177539503),
    ("did", 174514682),
    ("down", 212480563),
    ("even", 191623251),
    ("much", 214156439),
    ("way", 202158919),
    ("look", 175765692),
    ("come", 160188048),
    ("could", 188288526),
    ("know", 188425947),
    ("never", 133219634),
    ("need", 192131503),
    ("little", 131207168),
    ("going", 143529216),
    ("take", 163147826),
    ("own", 156893322),
    ("still", 164136039),
    ("man", 148271094),
    ("say", 152735876),
    ("too", 139739535),
    ("very", 211709113),
    ("every", 135773190),
    ("thing", 98256059),
    ("things", 112032373),
    ("feel", 77257562),
    ("better", 114538733),
    ("sure", 95141472),
    ("something", 107475968),
    ("stop", 81595672),
    ("today", 130728724),
    ("made", 141737880),
    ("life", 177528101),
    ("again", 139976642),
    ("night", 92528990),
    ("image", 106289922),
    ("around", 129784709),
    ("while", 124235776),
    ("always", 87906522),
    ("someone", 54923841),
    ("everyone", 44929403),
    ("anyone", 42521123),
    ("nothing", 51755955),
    ("everything", 41843250),
    ("another", 117968029),
    ("being", 144986963),
    ("done", 98917420),
    ("keep", 91501798),
    ("excellent", 45420606),
    ("friend", 52083895),
    ("friends", 68557775),
    ("family", 122106516),
    ("person", 79482362),
    ("oh", 70190521),
    ("hey", 26720288),
    ("hello", 18627172),
    ("yes", 84029708),
    ("ago", 86538336),
    ("since", 127999984),
    ("upvote", 1214570),
    ("profile", 51402764),
    ("myself", 66011089),
    ("himself", 55731093),
    ("herself", 30248098),
    ("yourself", 54910996),
    ("excited", 9214469),
    ("surprising", 6621907),
    ("surprised", 11218665),
    ("surprise", 22627471),
    ("brain", 41989251),
    ("mind", 85848502),
    ("head", 93289172),
    ("heart", 77449406),
    ("hurt", 18190970),
    ("pain", 40763326),
    ("hard", 98037769),
    ("bad", 84181367),
    ("sad", 19489028),
    ("happy", 65844523),
    ("angry", 12703637),
    ("tired", 14502222),
    ("alone", 29702158),
    ("sleep", 26606226),
    ("talk", 45594987),
    ("told", 55150172),
    ("tell", 70894960),
    ("said", 148600931),
    ("fuck", 39190330),
    ("damn", 11693727),
    ("hell", 26124967),
    ("stupid", 13250097),
    ("crazy", 18963655),
    ("word", 64312797),
    ("words", 64957497),
    ("message", 67337217),
    ("messages", 41390917),
    ("text", 106019963),
    ("wrong", 55096645),
    ("great", 241331460),
    ("nice", 72744405),
    ("cool", 47709818),
    ("fun", 68380551),
    ("funny", 28615570),
    ("school", 147524376),
    ("worker", 17647926),
    ("co-worker", 1032548),
    ("workers", 42755748),
    ("working", 114803160),
    ("job", 111449473),
    ("money", 101265156),
    ("live", 95576231),
    ("living", 65169680),
    ("die", 19982416),
    ("dying", 8781955),
    ("dead", 39535184),
    ("death", 61567916),
    ("end", 122424404),
    ("start", 86415612),
    ("try", 84036086),
    ("trying", 45784788),
    ("tried", 25772329),
    ("care", 92007241),
    ("wish", 31130268),
    ("hope", 68268557),
    ("left", 103205154),
    ("away", 107928594),
    ("enough", 75725861),
    ("maybe", 42501609),
    ("probably", 34130533),
    ("actually", 41718393),
    ("getting", 65336769),
    ("making", 78188291),
    ("anything", 57398572),
    ("son", 45657362),
    ("soon", 73135545),
    ("anymore", 12847961),
    ("nobody", 20710690),
    ("gone", 27738305),
    ("helps", 15460408),
    ("hurts", 5510276),
    ("stops", 7508368),
    ("wanted", 37618871),
    ("feeling", 22306179),
    ("feelings", 11518941),
    ("thought", 61094028),
    ("thoughts", 16491106),
    ("tomorrow", 20296229),
    ("yesterday", 17833739),
];

/// Word-to-count dictionary used by both suggestion oracles.
#[derive(Debug, Clone)]
pub struct FrequencyDictionary {
    counts: HashMap<String, u64>,
}

impl FrequencyDictionary {
    /// Build the dictionary from the built-in word list.
    pub fn builtin() -> Self {
        Self {
            counts: BUILTIN_WORDS
                .iter()
                .map(|(w, c)| (w.to_string(), *c))
                .collect(),
        }
    }

    /// Load a dictionary from a `word count` text file, one entry per
    /// line, whitespace-separated. Malformed lines are skipped.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let mut counts = HashMap::new();

        for line in reader.lines() {
            let line = line?;
            let mut fields = line.split_whitespace();
            let (Some(word), Some(count)) = (fields.next(), fields.next()) else {
                continue;
            };
            if let Ok(count) = count.parse::<u64>() {
                counts.insert(word.to_lowercase(), count);
            }
        }

        Ok(Self { counts })
    }

    /// Whether the word is a known dictionary entry.
    pub fn contains(&self, word: &str) -> bool {
        self.counts.contains_key(word)
    }

    /// Occurrence count of the word, 0 when unknown.
    pub fn frequency(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Iterate over all (word, count) entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(w, c)| (w.as_str(), *c))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether the dictionary has no entries.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_contains_core_words() {
        let dict = FrequencyDictionary::builtin();
        assert!(dict.contains("the"));
        assert!(dict.contains("help"));
        assert!(!dict.contains("helpl"));
    }

    #[test]
    fn test_frequency_ordering() {
        let dict = FrequencyDictionary::builtin();
        assert!(dict.frequency("so") > dict.frequency("soon"));
        assert!(dict.frequency("time") > dict.frequency("fuck"));
        assert_eq!(dict.frequency("notaword"), 0);
    }
}
