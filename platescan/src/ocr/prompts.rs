pub const SINGLE_PLATE_PROMPT: &str = "Extract ONLY the license plate text (letters/numbers/spaces). \
No extra words, no state names. If nothing is legible, reply with 'UNKNOWN'. \
If there is a dash in the plate, omit the dash. If this is not a license plate, reply with 'UNKNOWN'.";

pub const MULTI_PLATE_PROMPT: &str = "You are receiving an image that may contain multiple license plates. \
Extract ONLY the license plate text (letters/numbers/spaces) of every plate. \
No extra words, no state names. If a plate is not legible, use 'UNKNOWN' for it. \
If there is a dash in a plate, omit the dash. If there are no license plates, reply with [\"UNKNOWN\"]. \
Return the results as an array of strings, e.g. [\"ABC123\", \"XYZ789\"]";
