// Tests module
// Document fixtures: a mainnet-like spec read, edited and written back
// Properties: accessor identities, inference and iteration invariants
