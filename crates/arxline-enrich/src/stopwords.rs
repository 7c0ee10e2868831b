//! English stop words excluded from keyword candidates

const STOPWORDS: &[&str] = &[
    "about", "above", "across", "after", "again", "against", "all", "almost", "along", "already",
    "also", "although", "always", "among", "and", "another", "any", "are", "around", "because",
    "been", "before", "being", "below", "between", "both", "but", "can", "cannot", "could", "did",
    "does", "doing", "done", "down", "due", "during", "each", "either", "else", "enough", "especially",
    "etc", "even", "ever", "every", "few", "for", "from", "further", "furthermore", "had", "has",
    "have", "having", "hence", "her", "here", "hers", "herself", "him", "himself", "his", "how",
    "however", "into", "its", "itself", "just", "least", "less", "like", "made", "mainly", "make",
    "many", "may", "might", "more", "moreover", "most", "mostly", "much", "must", "near", "nearly",
    "neither", "nor", "not", "now", "off", "often", "once", "one", "only", "onto", "other", "others",
    "otherwise", "our", "ours", "ourselves", "out", "over", "own", "per", "perhaps", "quite",
    "rather", "really", "same", "several", "she", "should", "show", "shown", "shows", "since",
    "some", "such", "than", "that", "the", "their", "theirs", "them", "themselves", "then", "there",
    "thereby", "therefore", "these", "they", "this", "those", "though", "through", "thus", "too",
    "toward", "towards", "two", "under", "until", "upon", "use", "used", "uses", "using", "very",
    "via", "was", "well", "were", "what", "whatever", "when", "where", "whereas", "whether",
    "which", "while", "who", "whom", "whose", "why", "will", "with", "within", "without", "would",
    "yet", "you", "your", "yours", "yourself",
];

/// `word` must already be lowercase. The list is kept sorted.
pub(crate) fn is_stopword(word: &str) -> bool {
    STOPWORDS.binary_search(&word).is_ok()
}
